mod attributes;
mod response_enum;
mod response_struct;

pub(crate) use attributes::{FieldAttributes, VariantAttributes};
pub(crate) use response_enum::ResponseEnum;
pub(crate) use response_struct::{ResponseStruct, StructField};
