use crate::info::{GenericTypeCell, NullableInfo, TypeInfo, Typed};

impl<T: Typed> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeCell = GenericTypeCell::new();
        CELL.get_or_insert::<Self, _>(|| TypeInfo::Nullable(NullableInfo::new::<T>()))
    }
}
