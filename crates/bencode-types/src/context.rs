use std::fmt;

/// The two container shapes of the wire format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Map,
    List,
}

/// One open container.
///
/// Only maps carry alternation state: after a key has been produced the
/// frame expects the paired value, and after that value it expects a key
/// again. Every element of a list is a value, whatever its type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Frame {
    Map { expecting_value: bool },
    List,
}

impl Frame {
    #[must_use]
    pub fn kind(self) -> ContainerKind {
        match self {
            Self::Map { .. } => ContainerKind::Map,
            Self::List => ContainerKind::List,
        }
    }
}

/// What the next token fills, given the open containers.
///
/// ```text
/// ┌─────────────┬──────────────────────────┬──────────────────────────┐
/// │ Slot        │ Stack top                │ A string here is a…      │
/// ├─────────────┼──────────────────────────┼──────────────────────────┤
/// │ TopLevel    │ (empty)                  │ StringValue              │
/// │ Key         │ Map, expecting_value=no  │ FieldName                │
/// │ MapValue    │ Map, expecting_value=yes │ StringValue              │
/// │ ListElement │ List                     │ StringValue              │
/// └─────────────┴──────────────────────────┴──────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    TopLevel,
    Key,
    MapValue,
    ListElement,
}

impl Slot {
    /// `true` when a length-prefixed string in this slot is a map key.
    #[must_use]
    pub fn is_key(self) -> bool {
        self == Self::Key
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TopLevel => "top level",
            Self::Key => "map key position",
            Self::MapValue => "map value position",
            Self::ListElement => "list",
        })
    }
}

/// Stack of open containers, shared by the decoder and the encoder.
///
/// Classifying a string as key or value depends only on the top frame
/// (see [`slot`](Self::slot)), never on which token happened to come
/// before it. That keeps lists holding a mix of containers and scalars
/// classified correctly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContextStack {
    frames: Vec<Frame>,
}

impl ContextStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a container. Maps start out expecting a key.
    pub fn push(&mut self, kind: ContainerKind) {
        self.frames.push(match kind {
            ContainerKind::Map => Frame::Map {
                expecting_value: false,
            },
            ContainerKind::List => Frame::List,
        });
    }

    /// Close the innermost container. `None` when nothing is open.
    pub fn pop(&mut self) -> Option<ContainerKind> {
        self.frames.pop().map(Frame::kind)
    }

    #[must_use]
    pub fn current_kind(&self) -> Option<ContainerKind> {
        self.frames.last().copied().map(Frame::kind)
    }

    /// `true` when the innermost container is a map that has produced a
    /// key and is waiting for its value.
    #[must_use]
    pub fn is_expecting_value(&self) -> bool {
        matches!(
            self.frames.last(),
            Some(Frame::Map {
                expecting_value: true
            })
        )
    }

    /// Flip the key/value expectation of the innermost map.
    ///
    /// No effect when the innermost container is a list or nothing is open.
    pub fn toggle_expectation(&mut self) {
        if let Some(Frame::Map { expecting_value }) = self.frames.last_mut() {
            *expecting_value = !*expecting_value;
        }
    }

    #[must_use]
    pub fn slot(&self) -> Slot {
        match self.frames.last() {
            None => Slot::TopLevel,
            Some(Frame::Map {
                expecting_value: false,
            }) => Slot::Key,
            Some(Frame::Map {
                expecting_value: true,
            }) => Slot::MapValue,
            Some(Frame::List) => Slot::ListElement,
        }
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Open frames, outermost first.
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }
}
