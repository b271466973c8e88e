pub mod db;
pub mod cart {
    pub mod entity;
    pub mod listener;
    pub mod merge_ledger;
    pub mod repository;
}
pub mod order {
    pub mod entity;
    pub mod repository;
}
