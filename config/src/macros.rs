/// Declares the configuration group of the enclosing module.
///
/// ```rust
/// mod upload {
///     config::config_group!({
///         /// Path files are posted to.
///         ref path: String = "files/upload".to_owned();
///     });
/// }
///
/// let group = upload::ConfigValueGroup::new();
/// assert_eq!(group.path, "files/upload");
/// ```
///
/// The group name is the last segment of the module path, so a field `path` declared in
/// `config::groups::upload` is overridden by `CATALOG_UPLOAD_PATH`.
#[macro_export]
macro_rules! config_group {
    ({
        $(
            $(#[$meta:meta])*
            ref $name:ident : $type:ty = $value:expr;
        )+
    }) => {
        #[allow(unused_imports)]
        use $crate::ParsableConfigValue;

        #[derive(Debug, Clone)]
        pub struct ConfigValueGroup {
            $(
                $(#[$meta])*
                #[allow(non_snake_case)]
                pub $name: $type,
            )+
        }

        impl Default for ConfigValueGroup {
            fn default() -> Self {
                Self {
                    $( $name: $value, )+
                }
            }
        }

        impl ConfigValueGroup {
            /// Compiled-in defaults, without environment overrides.
            pub fn new() -> Self {
                Self::default()
            }

            pub fn env_var_name(field: &str) -> String {
                let group = module_path!().rsplit("::").next().unwrap_or_default();
                format!("{}_{}_{}", $crate::ENV_PREFIX, group.to_uppercase(), field.to_uppercase())
            }

            /// Replaces every field whose environment variable is set. Fields without one keep
            /// their current value, and unparsable values keep it too.
            pub fn apply_env_overrides(&mut self) {
                $(
                    if let Ok(raw) = std::env::var(Self::env_var_name(stringify!($name))) {
                        let current = self.$name.clone();
                        self.$name = <$type>::parse(stringify!($name), Some(raw), current);
                    }
                )+
            }
        }
    };
}
