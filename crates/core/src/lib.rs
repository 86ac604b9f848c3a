mod allocator;
mod executor;
mod exif_reader;
mod fingerprint;
mod meta_reader;
mod planner;
mod resolver;
mod scan;

pub use allocator::{allocate_target, mark_duplicate};
pub use executor::{
    execute_plan, ExecObserver, ExecOutcome, ExecutedEntry, ExecutionReport, NullExecObserver,
};
pub use fingerprint::fingerprint_file;
pub use planner::{
    generate_plan, FileRecord, NullObserver, PlanEntry, PlanObserver, PlanStats, RenamePlan,
    ScanOutcome,
};
pub use resolver::{DateResolver, DateSource, ExtractionError, ResolvedDate, StrategyResolver};
pub use scan::list_files;
