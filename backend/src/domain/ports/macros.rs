//! Helper macro generating error enums with snake_case constructors.

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

        impl $name {
            $(
                define_port_error!(@ctor $variant [] [] $( $($field : $ty,)* )?);
            )*
        }
    };

    // Accumulate `field: impl Into<T>` parameters and `field: field.into()`
    // initialisers, then emit the constructor once the field list is empty.
    (@ctor $variant:ident [] []) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };
    (@ctor $variant:ident [$($params:tt)+] [$($inits:tt)+]) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)+) -> Self {
                Self::$variant { $($inits)+ }
            }
        }
    };
    (@ctor $variant:ident [$($params:tt)*] [$($inits:tt)*] $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor $variant
            [$($params)* $field: impl Into<$ty>,]
            [$($inits)* $field: $field.into(),]
            $($rest)*
        );
    };
}

pub(crate) use define_port_error;
