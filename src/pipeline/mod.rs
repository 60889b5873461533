//! Processing pipeline components.

mod coordinator;
mod processor;

pub use coordinator::{
    ProcessCheck, ProcessOptions, clip_dir_for, collect_input_files, is_media_file,
    output_dir_for, output_path_for, reel_path_for, should_process,
};
pub use processor::{ProcessResult, process_file};
