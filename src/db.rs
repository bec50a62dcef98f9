pub mod store;
pub use store::{IdentityStore, NewRental, RentalStore, ReportStore};
pub mod identity_repo;
pub use identity_repo::IdentityRepository;
pub mod rental_repo;
pub use rental_repo::RentalRepository;
pub mod report_repo;
pub use report_repo::ReportRepository;
pub mod memory;
pub use memory::InMemoryStore;
