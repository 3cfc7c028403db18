//! Macro for declaring driven-port error enums.
//!
//! Each variant gets a `thiserror` message and a snake-case constructor whose
//! parameters accept anything convertible into the field types, so call sites
//! read `RecipeRepositoryError::not_found(id.to_string())`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        ::paste::paste! {
            impl $name {
                $(
                    #[doc = "Construct the `" $variant "` variant."]
                    pub fn [<$variant:snake>]($( $($field: impl Into<$ty>),* )?) -> Self {
                        Self::$variant $( { $($field: $field.into()),* } )?
                    }
                )*
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        pub enum ExampleStoreError {
            Offline => "store offline",
            Write { message: String } => "write failed: {message}",
            Batch { size: u32 } => "batch of {size} rejected",
            Quota { message: String, limit: u32 } => "quota: {message} ({limit})",
        }
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(ExampleStoreError::offline().to_string(), "store offline");
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = ExampleStoreError::write("permission denied");
        assert_eq!(err.to_string(), "write failed: permission denied");
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        let err = ExampleStoreError::batch(3_u32);
        assert_eq!(err.to_string(), "batch of 3 rejected");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = ExampleStoreError::quota("writes", 500_u32);
        assert_eq!(err.to_string(), "quota: writes (500)");
    }
}
