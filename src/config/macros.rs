/// `config_struct!` declares a configuration section with its defaults inline
///
/// ```
/// matchday::config_struct! {
///     pub struct PollingConfig {
///         interval_secs: u64 = 30,
///         enabled: bool = true,
///     }
/// }
/// ```
///
/// Expands to a struct with public fields, a `Default` impl built from the
/// inline values, and serde support where every missing TOML key falls back
/// to its default (`#[serde(default)]`).
#[macro_export]
macro_rules! config_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_name:ident: $field_type:ty = $default_value:expr
            ),*
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field_name: $field_type,
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $(
                        $field_name: $default_value,
                    )*
                }
            }
        }
    };
}
