pub mod in_memory_job_directory;
pub mod in_memory_partition_directory;

pub use in_memory_job_directory::InMemoryJobDirectory;
pub use in_memory_partition_directory::InMemoryPartitionDirectory;
