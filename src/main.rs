use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use openlibrary_client::api::{BooksRequest, ReadMultiRequest, RecentChangesRequest};
use openlibrary_client::configs::{self, Settings, logging};
use openlibrary_client::{Body, OpenLibrary, ReadMode};
use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

#[derive(Parser)]
#[command(name = "openlibrary")]
#[command(version, about = "Open Library API client", long_about = None)]
#[command(after_help = "EXAMPLES:
    openlibrary books ISBN:0451526538 --jscmd data --decode
    openlibrary cover isbn 0451526538 M -o cover.jpg
    openlibrary read-multi 'isbn:0451526538' 'lccn:12345;olid:OL123'
    openlibrary changes --year 2020 --kind update --limit 10")]
struct Cli {
    /// Settings file (default: config/<RUN_MODE>.json)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<String>,

    /// Read whole text responses instead of the first line only
    #[arg(long, global = true)]
    full_body: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Look up book metadata by bibliographic keys
    Books {
        /// Keys such as ISBN:0451526538 or OLID:OL123M
        #[arg(value_name = "TYPE:VALUE")]
        bibkeys: Vec<String>,

        #[arg(long, default_value = "json")]
        format: String,

        #[arg(long, default_value = "viewapi")]
        jscmd: String,

        /// Parse the response as JSON
        #[arg(long)]
        decode: bool,
    },

    /// Download a book cover
    Cover {
        key: String,
        value: String,
        size: String,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Download an author photo
    AuthorPhoto {
        key: String,
        value: String,
        size: String,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Look up the availability of one volume
    Read {
        id_type: String,
        id_value: String,

        #[arg(long)]
        decode: bool,
    },

    /// Look up the availability of several volumes at once
    ReadMulti {
        /// Synonym groups such as 'lccn:12345;olid:OL123'
        #[arg(value_name = "GROUP")]
        groups: Vec<String>,

        /// Reject empty groups
        #[arg(long)]
        strict: bool,

        #[arg(long)]
        decode: bool,
    },

    /// Read the recent changes feed
    Changes {
        #[arg(long)]
        year: Option<String>,

        #[arg(long)]
        month: Option<String>,

        #[arg(long)]
        day: Option<String>,

        /// Shortcut for --year, --month and --day (YYYY-MM-DD)
        #[arg(long, conflicts_with_all = ["year", "month", "day"])]
        date: Option<NaiveDate>,

        /// add-cover, add-book, merge-authors or update
        #[arg(long)]
        kind: Option<String>,

        #[arg(long, default_value_t = 100)]
        limit: u32,

        #[arg(long, default_value_t = 0)]
        offset: u32,

        /// true for bots only, false for humans only
        #[arg(long)]
        bot: Option<bool>,

        #[arg(long)]
        decode: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    configs::load_dotenv();
    let settings = match &cli.config {
        Some(path) => configs::load_settings_from(path),
        None => configs::load_settings(),
    };
    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("error: cannot load settings, {e}");
            return ExitCode::FAILURE;
        }
    };

    let _guard = match logging::set_global_logging_config(&settings.log) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    exit_code(run(cli, &settings), &mut io::stderr())
}

/// 실행 결과를 종료 코드로 변환한다. 에러는 `err`에 한 번만 출력 된다.
fn exit_code<W: Write>(result: Result<(), Box<dyn Error>>, err: &mut W) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = writeln!(err, "error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, settings: &Settings) -> Result<(), Box<dyn Error>> {
    let mut client = OpenLibrary::from_settings(settings)?;
    if cli.full_body {
        client = client.with_read_mode(ReadMode::AllLines);
    }

    match cli.command {
        Command::Books { bibkeys, format, jscmd, decode } => {
            let request = BooksRequest::builder()
                .bibkeys(bibkeys.iter().map(|key| split_pair(key)))
                .format(format)
                .jscmd(jscmd)
                .build()?;
            print_body(client.books.request(&request, decode)?)
        }
        Command::Cover { key, value, size, output } => {
            let image = client.covers.request_book_cover(&key, &value, &size)?;
            write_image(&output, &image)
        }
        Command::AuthorPhoto { key, value, size, output } => {
            let image = client.covers.request_author_photo(&key, &value, &size)?;
            write_image(&output, &image)
        }
        Command::Read { id_type, id_value, decode } => {
            print_body(client.read.single_request(&id_type, &id_value, decode)?)
        }
        Command::ReadMulti { groups, strict, decode } => {
            let request = groups.iter()
                .fold(ReadMultiRequest::builder(), |builder, group| builder.group(split_group(group)))
                .strict(strict)
                .build()?;
            print_body(client.read.multi_request(&request, decode)?)
        }
        Command::Changes { year, month, day, date, kind, limit, offset, bot, decode } => {
            let mut builder = RecentChangesRequest::builder().limit(limit).offset(offset);
            if let Some(date) = date {
                builder = builder.date(date);
            }
            if let Some(year) = year {
                builder = builder.year(year);
            }
            if let Some(month) = month {
                builder = builder.month(month);
            }
            if let Some(day) = day {
                builder = builder.day(day);
            }
            if let Some(kind) = kind {
                builder = builder.kind(kind);
            }
            if let Some(bot) = bot {
                builder = builder.bot(bot);
            }
            print_body(client.recent_changes.request(&builder.build()?, decode)?)
        }
    }
}

/// `type:value` 문자열을 나눈다. 구분자가 없을 경우 값은 비어있는 것으로 본다.
fn split_pair(s: &str) -> (&str, &str) {
    s.split_once(':').unwrap_or((s, ""))
}

fn split_group(s: &str) -> Vec<(&str, &str)> {
    s.split(';')
        .filter(|pair| !pair.is_empty())
        .map(split_pair)
        .collect()
}

fn print_body(body: Body) -> Result<(), Box<dyn Error>> {
    write_body(&mut io::stdout().lock(), body)
}

fn write_body<W: Write>(out: &mut W, body: Body) -> Result<(), Box<dyn Error>> {
    match body {
        Body::Text(text) => write!(out, "{}", text)?,
        Body::Bytes(bytes) => out.write_all(&bytes)?,
        Body::Json(value) => writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?,
    }
    Ok(())
}

fn write_image(output: &Path, image: &[u8]) -> Result<(), Box<dyn Error>> {
    fs::write(output, image)?;
    info!("{} 바이트를 {}에 저장 하였습니다.", image.len(), output.display());
    Ok(())
}
