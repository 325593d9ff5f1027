//! Device-tree matching
//!
//! Drivers publish a table of compatible strings; a device node binds to the
//! first table entry it lists.

use heapless::{String, Vec};

use crate::error::Error;

/// Maximum device name length
pub const MAX_NAME_LEN: usize = 32;

/// Maximum compatible string length
pub const MAX_COMPATIBLE_LEN: usize = 64;

/// Maximum compatible strings per node
pub const MAX_COMPATIBLES: usize = 4;

/// One entry of a driver's match table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OfDeviceId {
    /// `"vendor,model"`
    pub compatible: &'static str,
}

impl OfDeviceId {
    pub const fn new(compatible: &'static str) -> Self {
        Self { compatible }
    }
}

/// A device node as seen by drivers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceNode {
    name: String<MAX_NAME_LEN>,
    compatible: Vec<String<MAX_COMPATIBLE_LEN>, MAX_COMPATIBLES>,
}

impl DeviceNode {
    /// Create a node from its name and compatible list, most specific first
    pub fn new(name: &str, compatible: &[&str]) -> Result<Self, Error> {
        let mut node = Self {
            name: String::new(),
            compatible: Vec::new(),
        };
        node.name
            .push_str(name)
            .map_err(|_| Error::InvalidArgument)?;

        for entry in compatible {
            let mut value = String::new();
            value.push_str(entry).map_err(|_| Error::InvalidArgument)?;
            node.compatible
                .push(value)
                .map_err(|_| Error::InvalidArgument)?;
        }

        Ok(node)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Compatible strings, most specific first
    pub fn compatible(&self) -> impl Iterator<Item = &str> {
        self.compatible.iter().map(|c| c.as_str())
    }

    /// Check if the node lists `compatible`
    pub fn is_compatible(&self, compatible: &str) -> bool {
        self.compatible().any(|c| c == compatible)
    }
}

/// Find the match table entry that binds `node`
///
/// Node compatibles are tried in order, so the most specific string wins
/// when a table lists several of them.
pub fn of_match_device<'t>(table: &'t [OfDeviceId], node: &DeviceNode) -> Option<&'t OfDeviceId> {
    node.compatible()
        .find_map(|c| table.iter().find(|id| id.compatible == c))
}
