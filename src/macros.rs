/// Declare an action type: a field-less enum whose variants are the actions,
/// in ordinal order, each with its canonical name.
///
/// ```
/// actionset::actions! {
///     pub enum FileAction {
///         Read => "read",
///         Write => "write",
///         Execute => "execute",
///     }
/// }
///
/// use actionset::ActionType;
/// assert_eq!(FileAction::Write.ordinal(), 1);
/// assert_eq!(FileAction::Execute.name(), "execute");
/// assert_eq!(FileAction::ALL.len(), 3);
/// ```
///
/// The generated enum derives `Ord` over its implicit discriminants, so
/// ordering agrees with ordinals and `ActionSet` iterates in canonical order.
#[macro_export]
macro_rules! actions {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $action:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::ActionType for $name {
            const ALL: &'static [Self] = &[ $( $name::$variant ),+ ];

            fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $action ),+
                }
            }

            fn ordinal(self) -> usize {
                self as usize
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::ActionType::name(*self))
            }
        }
    };
}
