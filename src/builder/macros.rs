//! Macros for declaring state enums.

/// Generate a state enum and its `State` implementation.
///
/// The enum derives everything the registry and checkpoints need. The
/// `context:` clause binds the context type guards and actions receive.
///
/// # Example
///
/// ```
/// use hsm::state_enum;
///
/// pub struct Cluster {
///     replicas: u32,
/// }
///
/// state_enum! {
///     pub enum ClusterPhase {
///         Creating,
///         Running,
///         Deleted,
///         Failed,
///     }
///     context: Cluster;
///     final: [Deleted]
///     error: [Failed]
/// }
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        context: $context:ty;
        $(final: [$($final:ident),* $(,)?])?
        $(error: [$($error:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            type Context = $context;

            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    #[allow(unreachable_patterns)]
                    _ => false,
                }
            }

            fn is_error(&self) -> bool {
                match self {
                    $($(Self::$error => true,)*)?
                    #[allow(unreachable_patterns)]
                    _ => false,
                }
            }
        }
    };
}
