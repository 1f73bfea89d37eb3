//! Macro for declaring configuration structures.
//!
//! `env_struct!` emits the structure unchanged and an `EnvStruct`
//! implementation that yields the fields carrying a `= "rule"` suffix, in
//! declaration order. Fields without a rule are never yielded, so their type
//! does not need to implement `SetValue`.

/// Declare a configuration structure loadable with [`load`](crate::load).
///
/// # Usage
/// ```
/// envrule::env_struct! {
///     #[derive(Debug, Default)]
///     pub struct Config {
///         pub name: String = "name=APP_NAME, type=string, default=app",
///         pub port: u16 = "name=APP_PORT, type=port, default=3000",
///         pub tags: Vec<String>,
///     }
/// }
///
/// let env = std::collections::HashMap::from([("APP_PORT", "8080")]);
/// let config: Config = envrule::Loader::with_env(&env).load().unwrap();
/// assert_eq!(config.name, "app");
/// assert_eq!(config.port, 8080);
/// ```
#[macro_export]
macro_rules! env_struct {
    (@push $fields:ident, $this:ident, $field:ident, $rule:literal) => {
        $fields.push($crate::Field::new(
            ::std::stringify!($field),
            ::std::option::Option::Some($rule),
            &mut $this.$field,
        ));
    };

    (@push $fields:ident, $this:ident, $field:ident) => {};

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty $(= $rule:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::EnvStruct for $name {
            #[allow(unused_mut)]
            fn fields(
                &mut self,
            ) -> ::std::result::Result<::std::vec::Vec<$crate::Field<'_>>, ::std::string::String>
            {
                let mut fields = ::std::vec::Vec::new();
                $(
                    $crate::env_struct!(@push fields, self, $field $(, $rule)?);
                )*
                ::std::result::Result::Ok(fields)
            }
        }
    };
}
