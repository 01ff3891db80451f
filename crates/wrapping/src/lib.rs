//! Compact bitpacked representation of the list/required wrapping around a
//! named GraphQL type. `[[Int!]]!` is two list wrappings, a required outer
//! one and a nullable inner one, around a required `Int`.

use serde::{Deserialize, Serialize};

const INNER_REQUIRED: u32 = 1;
const DEPTH_SHIFT: u32 = 1;
const DEPTH_MASK: u32 = 0b1_1111 << DEPTH_SHIFT;
const LIST_SHIFT: u32 = 6;
const MAX_DEPTH: u32 = 32 - LIST_SHIFT;

/// Bit 0 is the required flag of the innermost (named) type, bits 1..6 hold
/// the list nesting depth and every further bit is the required flag of one
/// list wrapping, innermost first.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wrapping(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListWrapping {
    RequiredList,
    NullableList,
}

impl Wrapping {
    pub fn new(required: bool) -> Self {
        Wrapping(if required { INNER_REQUIRED } else { 0 })
    }

    pub fn required() -> Self {
        Self::new(true)
    }

    pub fn nullable() -> Self {
        Self::new(false)
    }

    pub fn inner_is_required(self) -> bool {
        self.0 & INNER_REQUIRED != 0
    }

    fn depth(self) -> u32 {
        (self.0 & DEPTH_MASK) >> DEPTH_SHIFT
    }

    fn with_depth(self, depth: u32) -> Self {
        assert!(depth <= MAX_DEPTH, "list nesting too deep");
        Wrapping((self.0 & !DEPTH_MASK) | (depth << DEPTH_SHIFT))
    }

    fn list_is_required(self, layer: u32) -> bool {
        self.0 & (1 << (LIST_SHIFT + layer)) != 0
    }

    #[must_use]
    pub fn wrapped_by(self, list_wrapping: ListWrapping) -> Self {
        let layer = self.depth();
        let mut next = self.with_depth(layer + 1);
        if let ListWrapping::RequiredList = list_wrapping {
            next.0 |= 1 << (LIST_SHIFT + layer);
        }
        next
    }

    /// Wrap in a nullable list.
    #[must_use]
    pub fn list(self) -> Self {
        self.wrapped_by(ListWrapping::NullableList)
    }

    /// Wrap in a non-null list.
    #[must_use]
    pub fn list_non_null(self) -> Self {
        self.wrapped_by(ListWrapping::RequiredList)
    }

    pub fn is_list(self) -> bool {
        self.depth() > 0
    }

    /// Whether the outermost wrapping is non-null.
    pub fn is_required(self) -> bool {
        match self.depth() {
            0 => self.inner_is_required(),
            depth => self.list_is_required(depth - 1),
        }
    }

    pub fn is_nullable(self) -> bool {
        !self.is_required()
    }

    /// List wrappings, innermost first.
    pub fn list_wrappings(
        self,
    ) -> impl ExactSizeIterator<Item = ListWrapping> + DoubleEndedIterator {
        (0..self.depth()).map(move |layer| {
            if self.list_is_required(layer) {
                ListWrapping::RequiredList
            } else {
                ListWrapping::NullableList
            }
        })
    }

    /// Removes and returns the outermost list wrapping, if any.
    pub fn pop_list_wrapping(&mut self) -> Option<ListWrapping> {
        let depth = self.depth();
        if depth == 0 {
            return None;
        }
        let layer = depth - 1;
        let wrapping = if self.list_is_required(layer) {
            ListWrapping::RequiredList
        } else {
            ListWrapping::NullableList
        };
        self.0 &= !(1 << (LIST_SHIFT + layer));
        *self = self.with_depth(layer);
        Some(wrapping)
    }

    /// Renders the wrapping around a type name, GraphQL style.
    pub fn write_type_string(
        self,
        name: &str,
        f: &mut dyn std::fmt::Write,
    ) -> std::fmt::Result {
        for _ in 0..self.depth() {
            write!(f, "[")?;
        }
        write!(f, "{name}")?;
        if self.inner_is_required() {
            write!(f, "!")?;
        }
        for wrapping in self.list_wrappings() {
            write!(f, "]")?;
            if let ListWrapping::RequiredList = wrapping {
                write!(f, "!")?;
            }
        }
        Ok(())
    }

    pub fn to_type_string(self, name: &str) -> String {
        let mut out = String::new();
        self.write_type_string(name, &mut out)
            .expect("writing to a String cannot fail");
        out
    }
}

impl std::fmt::Debug for Wrapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Wrapping({})", self.to_type_string("_"))
    }
}
