//! Layout persistence contract and the JSON implementation.

use std::io::{Read, Write};

use crate::factory::Factory;
use crate::model::NodeId;
use crate::snapshot::LayoutSnapshot;

/// Failures while persisting or restoring a layout.
#[derive(Debug, thiserror::Error)]
pub enum SerializerError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown dockable kind '{0}'")]
    UnknownKind(String),

    #[error("invalid layout: {0}")]
    InvalidLayout(String),
}

/// Converts layout snapshots to and from a text format.
pub trait DockSerializer {
    fn serialize(&self, layout: &LayoutSnapshot) -> Result<String, SerializerError>;

    fn deserialize(&self, text: &str) -> Result<LayoutSnapshot, SerializerError>;

    fn load(&self, reader: &mut dyn Read) -> Result<LayoutSnapshot, SerializerError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.deserialize(&text)
    }

    fn save(&self, writer: &mut dyn Write, layout: &LayoutSnapshot) -> Result<(), SerializerError> {
        let text = self.serialize(layout)?;
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

/// serde_json backed serializer.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer {
    pretty: bool,
}

impl JsonSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indented output.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl DockSerializer for JsonSerializer {
    fn serialize(&self, layout: &LayoutSnapshot) -> Result<String, SerializerError> {
        let text = if self.pretty {
            serde_json::to_string_pretty(layout)?
        } else {
            serde_json::to_string(layout)?
        };
        Ok(text)
    }

    fn deserialize(&self, text: &str) -> Result<LayoutSnapshot, SerializerError> {
        Ok(serde_json::from_str(text)?)
    }
}

impl Factory {
    /// Export `root` and write it through `serializer`.
    pub fn save_layout(
        &self,
        root: NodeId,
        serializer: &dyn DockSerializer,
        writer: &mut dyn Write,
    ) -> Result<(), SerializerError> {
        let layout = self
            .export_layout(root)
            .ok_or_else(|| SerializerError::InvalidLayout(format!("{} is not a root dock", root)))?;
        serializer.save(writer, &layout)
    }

    /// Read a layout through `serializer` and import it. Returns the new root.
    pub fn load_layout(
        &mut self,
        serializer: &dyn DockSerializer,
        reader: &mut dyn Read,
    ) -> Result<NodeId, SerializerError> {
        let layout = serializer.load(reader)?;
        self.import_layout(&layout)
    }
}
