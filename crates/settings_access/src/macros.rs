//! The [`settings!`](crate::settings) accessor generator.
//!
//! ```text
//! settings! {
//!     Host [, options = <SettingsOptions expr>];
//!     key: Type = default,
//!     ...
//! }
//! ```
//!
//! `Type` is one of `String`, `Integer`, `Float`, `Boolean`, `Yaml` or
//! `Object`. For every key the macro generates, on `Host`:
//!
//! | method | returns |
//! |--------|---------|
//! | `key(&self)` | current value or default, typed |
//! | `set_key(&mut self, value)` | canonical value, typed |
//! | `is_key(&self)` | truthiness of the current value |
//!
//! It also implements [`Configurable`](crate::Configurable) for `Host`, with
//! the registry built once on first use.
//!
//! A key may appear only once per block: repeating it generates the same
//! methods twice and fails to compile. Registries built by hand with
//! [`SettingRegistry::add`](crate::SettingRegistry::add) keep the last
//! declaration instead.

/// Declare settings on a host type and generate typed accessors for them.
#[macro_export]
macro_rules! settings {
    (@ty String) => { ::std::string::String };
    (@ty Integer) => { i64 };
    (@ty Float) => { f64 };
    (@ty Boolean) => { bool };
    (@ty Yaml) => { ::std::string::String };
    (@ty Object) => { $crate::serde_json::Value };

    (
        $host:ty $(, options = $options:expr)? ;
        $( $key:ident : $kind:ident = $default:expr ),* $(,)?
    ) => {
        impl $crate::Configurable for $host {
            fn registry() -> &'static $crate::SettingRegistry {
                static REGISTRY: ::std::sync::LazyLock<$crate::SettingRegistry> =
                    ::std::sync::LazyLock::new(|| {
                        #[allow(unused_mut)]
                        let mut registry = $crate::SettingRegistry::new();
                        $( registry.set_options($options); )?
                        $(
                            registry.add(
                                stringify!($key),
                                $crate::SettingType::$kind,
                                $default,
                            );
                        )*
                        registry
                    });
                &REGISTRY
            }
        }

        $crate::paste::paste! {
            impl $host {
                $(
                    #[doc = concat!("Current value of the `", stringify!($key), "` setting.")]
                    pub fn $key(&self) -> $crate::settings!(@ty $kind) {
                        $crate::accessor::read_declared(self, stringify!($key))
                    }

                    #[doc = concat!("Set the `", stringify!($key), "` setting, returning the canonical value.")]
                    pub fn [<set_ $key>](
                        &mut self,
                        value: impl ::std::convert::Into<$crate::serde_json::Value>,
                    ) -> ::std::result::Result<$crate::settings!(@ty $kind), $crate::AccessError> {
                        $crate::accessor::write_declared(self, stringify!($key), value.into())
                    }

                    #[doc = concat!("Truthiness of the `", stringify!($key), "` setting.")]
                    pub fn [<is_ $key>](&self) -> bool {
                        $crate::accessor::query_declared(self, stringify!($key))
                    }
                )*
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use settings_schema::{BlobFormat, SchemaError, SettingsContainer, SettingsOptions};

    use crate::host::{BoxError, SettingsHost};
    use crate::{AccessError, Configurable, Settings};

    #[derive(Debug, Default)]
    struct Article {
        settings: Option<SettingsContainer>,
        persisted: bool,
        saves: usize,
    }

    impl SettingsHost for Article {
        fn settings(&self) -> Option<&SettingsContainer> {
            self.settings.as_ref()
        }

        fn settings_mut(&mut self) -> &mut Option<SettingsContainer> {
            &mut self.settings
        }

        fn is_new(&self) -> bool {
            !self.persisted
        }

        fn persist(&mut self) -> Option<Result<(), BoxError>> {
            self.saves += 1;
            Some(Ok(()))
        }
    }

    crate::settings! {
        Article;
        title: String = "Untitled",
        count: Integer = 0,
        ratio: Float = 0.5,
        enabled: Boolean = true,
        notes: Yaml = "",
        extra: Object = Value::Null,
    }

    #[derive(Debug, Default)]
    struct Draft {
        settings: Option<SettingsContainer>,
    }

    impl SettingsHost for Draft {
        fn settings(&self) -> Option<&SettingsContainer> {
            self.settings.as_ref()
        }

        fn settings_mut(&mut self) -> &mut Option<SettingsContainer> {
            &mut self.settings
        }

        fn is_new(&self) -> bool {
            false
        }
    }

    crate::settings! {
        Draft, options = SettingsOptions::new().with_column("prefs").with_format(BlobFormat::Yaml);
        pinned: Boolean = false,
    }

    fn saved_article() -> Article {
        Article {
            persisted: true,
            ..Article::default()
        }
    }

    #[test]
    fn test_scenario_string_default_then_write() {
        let mut article = Article::default();
        assert_eq!(article.title(), "Untitled");
        assert_eq!(article.set_title(42).unwrap(), "42");
        assert_eq!(article.title(), "42");
    }

    #[test]
    fn test_scenario_integer_digit_stripping() {
        let mut article = Article::default();
        assert_eq!(article.set_count("1,000").unwrap(), 1000);
        assert_eq!(article.count(), 1000);
        article.set_count("abc").unwrap();
        assert_eq!(article.count(), 0);
    }

    #[test]
    fn test_scenario_boolean_default_and_query() {
        let mut article = Article::default();
        assert!(article.enabled());
        assert!(article.is_enabled());
        article.set_enabled("f").unwrap();
        assert!(!article.enabled());
        assert!(!article.is_enabled());
    }

    #[test]
    fn test_float_yaml_and_object_accessors() {
        let mut article = Article::default();
        assert!((article.ratio() - 0.5).abs() < f64::EPSILON);
        assert!((article.set_ratio("2.25").unwrap() - 2.25).abs() < f64::EPSILON);

        assert_eq!(article.set_notes(json!(["a", "b"])).unwrap(), "- a\n- b\n");
        assert!(article.is_notes());

        assert_eq!(article.extra(), Value::Null);
        assert!(!article.is_extra());
        article.set_extra(json!({"k": [1, 2]})).unwrap();
        assert_eq!(article.extra(), json!({"k": [1, 2]}));
    }

    #[test]
    fn test_generated_setters_autosave_saved_records_once() {
        let mut article = saved_article();
        article.set_title("Hello").unwrap();
        article.set_title("Hello").unwrap();
        assert_eq!(article.saves, 1);
        article.set_count(1).unwrap();
        assert_eq!(article.saves, 2);
    }

    #[test]
    fn test_reads_never_create_the_container() {
        let article = Article::default();
        let _ = article.title();
        let _ = article.is_enabled();
        let _ = article.settings_snapshot();
        assert!(article.settings.is_none());
    }

    #[test]
    fn test_generic_entry_points() {
        let mut article = saved_article();
        assert_eq!(article.setting("title").unwrap(), json!("Untitled"));
        assert_eq!(article.set_setting("count", "12").unwrap(), json!(12));
        assert_eq!(article.setting("count").unwrap(), json!(12));
        assert!(article.setting_query("enabled").unwrap());
    }

    #[test]
    fn test_generic_entry_points_reject_unknown_keys() {
        let mut article = Article::default();
        assert_eq!(
            article.setting("missing").unwrap_err(),
            SchemaError::UnknownSetting("missing".into())
        );
        let err = article.set_setting("missing", 1).unwrap_err();
        assert!(matches!(err, AccessError::Schema(SchemaError::UnknownSetting(_))));
        assert!(article.settings.is_none());
    }

    #[test]
    fn test_snapshot_lists_every_declared_setting() {
        let mut article = Article::default();
        article.set_count(3).unwrap();
        let snapshot = article.settings_snapshot();
        let keys: Vec<_> = snapshot.keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 6);
        assert_eq!(snapshot["count"], json!(3));
        assert_eq!(snapshot["title"], json!("Untitled"));
    }

    #[test]
    fn test_options_are_applied() {
        let registry = Draft::registry();
        assert_eq!(registry.serialized_column(), ("prefs", BlobFormat::Yaml));
        let mut draft = Draft::default();
        assert!(draft.set_pinned(1).unwrap());
        assert!(draft.pinned());
    }

    #[derive(Debug, Default)]
    struct Legacy {
        settings: Option<SettingsContainer>,
    }

    impl SettingsHost for Legacy {
        fn settings(&self) -> Option<&SettingsContainer> {
            self.settings.as_ref()
        }

        fn settings_mut(&mut self) -> &mut Option<SettingsContainer> {
            &mut self.settings
        }

        fn is_new(&self) -> bool {
            true
        }
    }

    crate::settings! {
        Legacy;
        flag: Boolean = 1,
        limit: Integer = "10",
    }

    #[test]
    fn test_mistyped_defaults_agree_with_query() {
        let mut legacy = Legacy::default();
        assert!(legacy.flag());
        assert_eq!(legacy.flag(), legacy.is_flag());
        assert_eq!(legacy.setting("flag").unwrap(), json!(1));
        assert_eq!(legacy.limit(), 10);
        assert_eq!(legacy.setting("limit").unwrap(), json!("10"));

        legacy.set_flag("0").unwrap();
        assert!(!legacy.flag());
        assert_eq!(legacy.flag(), legacy.is_flag());
    }

    #[test]
    fn test_registry_is_shared_between_instances() {
        assert!(std::ptr::eq(Article::registry(), Article::registry()));
        assert_eq!(Article::registry().len(), 6);
    }
}
