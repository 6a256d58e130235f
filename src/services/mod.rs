pub mod lookup;
pub mod storage;
