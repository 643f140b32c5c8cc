use std::process::ExitCode;

use color_eyre::eyre;
use text2bin::cli::{self, convert, opt::Options};

fn main() -> eyre::Result<ExitCode> {
    let opt: Options = cli::init()?;
    convert::run(opt)
}
