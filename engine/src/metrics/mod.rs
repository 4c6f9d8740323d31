// Derived portfolio metrics. Every function here is a pure transform over
// the normalized tables; nothing is cached or mutated between calls.
pub mod allocation;
pub mod capital;
pub mod company;
pub mod concentration;
pub mod loans;
pub mod summary;
pub mod timeline;
