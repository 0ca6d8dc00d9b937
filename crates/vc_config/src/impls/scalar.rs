use alloc::string::String;

crate::impl_config_scalar!(bool);
crate::impl_config_scalar!(char);
crate::impl_config_scalar!(String);

crate::impl_config_scalar!(u8);
crate::impl_config_scalar!(u16);
crate::impl_config_scalar!(u32);
crate::impl_config_scalar!(u64);
crate::impl_config_scalar!(u128);
crate::impl_config_scalar!(usize);

crate::impl_config_scalar!(i8);
crate::impl_config_scalar!(i16);
crate::impl_config_scalar!(i32);
crate::impl_config_scalar!(i64);
crate::impl_config_scalar!(i128);
crate::impl_config_scalar!(isize);

crate::impl_config_scalar!(f32);
crate::impl_config_scalar!(f64);
