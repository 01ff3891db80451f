mod range;

pub use range::IdRange;

/// Generates a `NonZeroU32`-backed id struct indexing into one field of its
/// owning struct. Ids can only be created through `From<usize>`, which keeps
/// the zero-niche offset in a single place.
#[macro_export]
macro_rules! id_newtypes {
    ($($owner:ident.$field:ident[$name:ident] => $out:ident unless $msg:literal,)*) => {
        $(
            #[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
            pub struct $name(std::num::NonZeroU32);

            impl std::ops::Index<$name> for $owner {
                type Output = $out;

                fn index(&self, index: $name) -> &$out {
                    &self.$field[usize::from(index)]
                }
            }

            impl std::ops::IndexMut<$name> for $owner {
                fn index_mut(&mut self, index: $name) -> &mut $out {
                    &mut self.$field[usize::from(index)]
                }
            }

            impl std::ops::Index<$crate::IdRange<$name>> for $owner {
                type Output = [$out];

                fn index(&self, range: $crate::IdRange<$name>) -> &[$out] {
                    &self.$field[usize::from(range.start)..usize::from(range.end)]
                }
            }

            impl From<usize> for $name {
                fn from(index: usize) -> Self {
                    let id = u32::try_from(index)
                        .ok()
                        .and_then(|index| index.checked_add(1))
                        .and_then(std::num::NonZeroU32::new)
                        .expect($msg);
                    Self(id)
                }
            }

            impl From<$name> for usize {
                fn from(id: $name) -> Self {
                    (id.0.get() - 1) as usize
                }
            }

            impl std::fmt::Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    let name = stringify!($name);
                    write!(
                        f,
                        "{}#{}",
                        name.strip_suffix("Id").unwrap_or(name),
                        usize::from(*self)
                    )
                }
            }

            impl std::fmt::Debug for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    std::fmt::Display::fmt(self, f)
                }
            }
        )*
    }
}
