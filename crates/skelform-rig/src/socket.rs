//! Attachment sockets and the socket registry.
//!
//! Sockets are addressed by `(module, semantic name)` keys. Consumers
//! never index into a producer's socket array: a key either resolves or
//! the link is rejected, so changing a module's joint counts cannot
//! silently reroute an attachment.

use std::collections::BTreeMap;

use crate::error::{BuildError, BuildResult};
use skelform_scene::{NodeId, Scene};

/// Registry key of a socket: owning module plus semantic socket name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SocketKey {
    /// Zone-qualified module identifier (e.g. `L_TrexLeg`).
    pub module: String,
    /// Semantic socket name (e.g. `pelvis`, `tip`, `ankle`).
    pub name: String,
}

impl SocketKey {
    /// Creates a socket key.
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for SocketKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.module, self.name)
    }
}

/// Whether a socket consumes or provides a driving space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketKind {
    /// Receives at most one primary pose-driving link.
    SpaceIn,
    /// May drive any number of dependent SpaceIns.
    SpaceOut,
}

/// A registered socket: key, kind, and the scene node carrying the space.
#[derive(Debug, Clone)]
pub struct Socket {
    /// Registry key.
    pub key: SocketKey,
    /// Socket kind.
    pub kind: SocketKind,
    /// The transform node that carries this socket's space.
    pub node: NodeId,
}

/// All sockets of one build, keyed by `(module, name)`.
#[derive(Debug, Default)]
pub struct SocketRegistry {
    sockets: BTreeMap<SocketKey, Socket>,
}

impl SocketRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a socket. Fails if the key is taken.
    pub fn register(&mut self, key: SocketKey, kind: SocketKind, node: NodeId) -> BuildResult<()> {
        if self.sockets.contains_key(&key) {
            return Err(BuildError::DuplicateSocket(key));
        }
        self.sockets.insert(
            key.clone(),
            Socket { key, kind, node },
        );
        Ok(())
    }

    /// Resolves a socket key.
    pub fn get(&self, key: &SocketKey) -> BuildResult<&Socket> {
        self.sockets
            .get(key)
            .ok_or_else(|| BuildError::UnknownSocket(key.clone()))
    }

    /// Returns all sockets of one module, in key order.
    pub fn sockets_of<'a>(&'a self, module: &'a str) -> impl Iterator<Item = &'a Socket> + 'a {
        self.sockets
            .values()
            .filter(move |s| s.key.module == module)
    }

    /// Number of registered sockets.
    pub fn len(&self) -> usize {
        self.sockets.len()
    }

    /// Returns true when no sockets are registered.
    pub fn is_empty(&self) -> bool {
        self.sockets.is_empty()
    }

    /// Links a producer SpaceOut to a consumer SpaceIn.
    ///
    /// Installs one pose coupling and one independent scale coupling.
    /// With `maintain_offset`, the driven socket's world pose right after
    /// the call equals its world pose right before it.
    ///
    /// A SpaceIn accepts exactly one primary link; a second link is
    /// rejected with [`BuildError::SocketAlreadyDriven`].
    pub fn link(
        &self,
        scene: &mut Scene,
        driver: &SocketKey,
        driven: &SocketKey,
        maintain_offset: bool,
    ) -> BuildResult<()> {
        let driver_socket = self.get(driver)?;
        let driven_socket = self.get(driven)?;
        if driver_socket.kind != SocketKind::SpaceOut || driven_socket.kind != SocketKind::SpaceIn {
            return Err(BuildError::SocketKindMismatch {
                driver: driver.clone(),
                driven: driven.clone(),
            });
        }
        if scene.is_pose_driven(driven_socket.node) || scene.is_scale_driven(driven_socket.node) {
            return Err(BuildError::SocketAlreadyDriven(driven.clone()));
        }
        scene.bind_pose(driver_socket.node, driven_socket.node, maintain_offset)?;
        scene.bind_scale(driver_socket.node, driven_socket.node, maintain_offset)?;
        Ok(())
    }
}
