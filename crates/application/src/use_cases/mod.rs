pub mod classify_batch;

pub use classify_batch::ClassifyBatchUseCase;
