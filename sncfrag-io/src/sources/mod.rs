pub mod bam;
pub mod bed;
pub mod memory;

pub use self::bam::BamReadSource;
pub use self::bed::BedReadSource;
pub use self::memory::MemoryReadSource;
