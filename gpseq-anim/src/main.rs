//! Main binary entry point for the `gpseq-anim` front end.
//!
//! This binary simply delegates to the shared `entry_point::run_with_args()` function
//! so that every entry point behaves the same way.

use anyhow::Result;

fn main() -> Result<()> {
    let code = gpseq_anim::entry_point::run_with_args(std::env::args().skip(1).collect())?;
    std::process::exit(code);
}
