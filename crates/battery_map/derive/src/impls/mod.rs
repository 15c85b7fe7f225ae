mod enumeration;
mod response;

pub(crate) use enumeration::impl_enumeration;
pub(crate) use response::impl_response;
