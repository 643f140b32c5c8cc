use std::{
    io::{self, BufWriter, IsTerminal, Read, Write},
    process::ExitCode,
};

use bitpattern::Encoder;
use clap::CommandFactory;
use color_eyre::eyre::{self, WrapErr};
use log::debug;

use super::opt::{Options, Settings};

/// What to do with the given options
#[derive(Debug, PartialEq, Eq)]
pub enum Mode<'a> {
    /// Convert standard input
    Stream,
    /// Convert the `--text` argument
    Text(&'a str),
    /// Print the usage and fail
    Usage,
}

impl<'a> Mode<'a> {
    /// Piped input always wins over `--text` and `--help`
    pub fn select(piped: bool, opt: &'a Options) -> Self {
        if piped {
            return Self::Stream;
        }
        match opt.text.as_deref() {
            Some(text) if !text.is_empty() && !opt.help => Self::Text(text),
            _ => Self::Usage,
        }
    }
}

/// How a successful run ends
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    /// Output was written
    Converted,
    /// The usage was printed instead
    Usage,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Converted => ExitCode::SUCCESS,
            Status::Usage => ExitCode::FAILURE,
        }
    }
}

/// Write the bit patterns of `text`, followed by a newline
pub fn write_text<W: Write>(out: &mut W, text: &str, settings: &Settings) -> io::Result<()> {
    let conversion = Encoder::new()
        .encode(text.as_bytes())
        .with_delim(Some(settings.delim.as_bytes()));
    out.write_all(&conversion.to_bytes())?;
    out.write_all(b"\n")?;
    out.flush()
}

fn write_usage<E: Write>(err: &mut E) -> io::Result<()> {
    let mut cmd = Options::command();
    cmd.write_help(err)?;
    writeln!(err)
}

/// Run in the given mode, reading `input` only when streaming
pub fn dispatch<R, W, E>(
    mode: Mode<'_>,
    opt: &Options,
    input: R,
    mut output: W,
    mut err: E,
) -> eyre::Result<Status>
where
    R: Read,
    W: Write,
    E: Write,
{
    match mode {
        Mode::Stream => {
            let settings = opt.settings().wrap_err("Failed to load config")?;
            debug!("Input is piped, streaming with {:?}", settings);
            Encoder::new()
                .stream(
                    input,
                    output,
                    settings.buffer_size,
                    Some(settings.delim.as_bytes()),
                )
                .wrap_err("Failed to convert standard input")?;
        }
        Mode::Text(text) => {
            let settings = opt.settings().wrap_err("Failed to load config")?;
            write_text(&mut output, text, &settings)
                .wrap_err("Failed to write to standard output")?;
        }
        Mode::Usage => {
            write_usage(&mut err)?;
            return Ok(Status::Usage);
        }
    }
    Ok(Status::Converted)
}

/// Run the command line tool
pub fn run(opt: Options) -> eyre::Result<ExitCode> {
    let stdin = io::stdin();
    let mode = Mode::select(!stdin.is_terminal(), &opt);
    let stdout = io::stdout();
    let status = dispatch(
        mode,
        &opt,
        stdin.lock(),
        BufWriter::new(stdout.lock()),
        io::stderr(),
    )?;
    Ok(status.into())
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::{dispatch, write_text, Mode, Status};
    use crate::cli::opt::{Options, Settings};

    fn settings(delim: &str) -> Settings {
        Settings {
            delim: delim.to_owned(),
            buffer_size: None,
        }
    }

    #[test]
    fn test_write_text() {
        let mut out = Vec::new();
        write_text(&mut out, "AB", &settings("")).unwrap();
        assert_eq!(out, b"10000011000010\n");

        let mut out = Vec::new();
        write_text(&mut out, "AB", &settings(" ")).unwrap();
        assert_eq!(out, b"1000001 1000010\n");
    }

    #[test]
    fn test_piped_input_wins() {
        let opt = Options {
            text: Some("ignored".to_owned()),
            help: true,
            ..Options::default()
        };
        assert_eq!(Mode::select(true, &opt), Mode::Stream);
        assert_eq!(Mode::select(true, &Options::default()), Mode::Stream);
    }

    #[test]
    fn test_text_mode() {
        let opt = Options {
            text: Some("hello".to_owned()),
            ..Options::default()
        };
        assert_eq!(Mode::select(false, &opt), Mode::Text("hello"));
    }

    #[test]
    fn test_usage() {
        assert_eq!(Mode::select(false, &Options::default()), Mode::Usage);

        let empty = Options {
            text: Some(String::new()),
            ..Options::default()
        };
        assert_eq!(Mode::select(false, &empty), Mode::Usage);

        let help = Options {
            text: Some("hello".to_owned()),
            help: true,
            ..Options::default()
        };
        assert_eq!(Mode::select(false, &help), Mode::Usage);
    }

    #[test]
    fn test_usage_fails() {
        let opt = Options::default();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let status = dispatch(Mode::Usage, &opt, io::empty(), &mut out, &mut err).unwrap();

        assert_eq!(status, Status::Usage);
        assert!(out.is_empty());
        let usage = String::from_utf8(err).unwrap();
        assert!(usage.contains("--buffersize"));
    }

    #[test]
    fn test_text_succeeds() {
        let opt = Options {
            text: Some("AB".to_owned()),
            delim: Some("-".to_owned()),
            ..Options::default()
        };
        let mut out = Vec::new();
        let status = dispatch(Mode::select(false, &opt), &opt, io::empty(), &mut out, io::sink())
            .unwrap();

        assert_eq!(status, Status::Converted);
        assert_eq!(out, b"1000001-1000010\n");
    }

    #[test]
    fn test_stream_succeeds() {
        let opt = Options {
            delim: Some(",".to_owned()),
            buffer_size: Some(-3),
            ..Options::default()
        };
        let mut out = Vec::new();
        let status = dispatch(Mode::Stream, &opt, &[1u8, 2][..], &mut out, io::sink()).unwrap();

        assert_eq!(status, Status::Converted);
        assert_eq!(out, b"1,10\n");
    }

    #[test]
    fn test_stream_errors_propagate() {
        struct Broken;

        impl io::Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "broken pipe"))
            }
        }

        let opt = Options::default();
        let mut out = Vec::new();
        let report = dispatch(Mode::Stream, &opt, Broken, &mut out, io::sink()).unwrap_err();

        assert!(report.to_string().contains("standard input"));
        assert_eq!(out, b"\n");

        let huge = Options {
            buffer_size: Some(i64::MAX),
            ..Options::default()
        };
        assert!(dispatch(Mode::Stream, &huge, io::empty(), io::sink(), io::sink()).is_err());
    }
}
