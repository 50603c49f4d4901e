//! Command-line entry point over `blog_core` services.
//!
//! # Responsibility
//! - Provide a `ping` probe to verify `blog_core` linkage.
//! - Create and list authors/posts against a SQLite file or in-memory DB.
//!
//! # Environment
//! - `BLOG_LOG_DIR`: absolute directory for rolling log files (optional).
//! - `BLOG_VALIDATION_CONFIG`: JSON file with `clickbait_markers` (optional).

use blog_core::db::{open_db, open_db_in_memory};
use blog_core::{
    AuthorDraft, AuthorListQuery, AuthorService, PostCategory, PostDraft, PostListQuery,
    PostService, SqliteAuthorRepository, SqlitePostRepository, ValidationConfig,
};
use rusqlite::Connection;
use std::error::Error;
use std::process::ExitCode;

const USAGE: &str = "usage: blog_cli [--db PATH] <command>

commands:
  ping
  add-author NAME PHONE_NUMBER
  list-authors
  add-post JSON_FILE
  list-posts [Fiction|Non-Fiction]";

type CliResult<T> = Result<T, Box<dyn Error>>;

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Ping,
    AddAuthor { name: String, phone_number: String },
    ListAuthors,
    AddPost { json_file: String },
    ListPosts { category: Option<String> },
}

#[derive(Debug, PartialEq, Eq)]
struct Invocation {
    db_path: Option<String>,
    command: Command,
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let invocation = match parse_args(&args) {
        Ok(invocation) => invocation,
        Err(message) => {
            eprintln!("{message}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(invocation) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: &[String]) -> Result<Invocation, String> {
    let mut rest = args;
    let mut db_path = None;
    if let [flag, path, tail @ ..] = rest {
        if flag == "--db" {
            db_path = Some(path.clone());
            rest = tail;
        }
    }

    let command = match rest {
        [cmd] if cmd == "ping" => Command::Ping,
        [cmd, name, phone_number] if cmd == "add-author" => Command::AddAuthor {
            name: name.clone(),
            phone_number: phone_number.clone(),
        },
        [cmd] if cmd == "list-authors" => Command::ListAuthors,
        [cmd, json_file] if cmd == "add-post" => Command::AddPost {
            json_file: json_file.clone(),
        },
        [cmd] if cmd == "list-posts" => Command::ListPosts { category: None },
        [cmd, category] if cmd == "list-posts" => Command::ListPosts {
            category: Some(category.clone()),
        },
        [] => return Err("missing command".to_string()),
        other => return Err(format!("unrecognized arguments: {}", other.join(" "))),
    };

    Ok(Invocation { db_path, command })
}

fn run(invocation: Invocation) -> CliResult<()> {
    if let Ok(log_dir) = std::env::var("BLOG_LOG_DIR") {
        blog_core::init_logging(blog_core::default_log_level(), &log_dir)?;
    }

    if invocation.command == Command::Ping {
        println!("blog_core ping={}", blog_core::ping());
        println!("blog_core version={}", blog_core::core_version());
        return Ok(());
    }

    let conn = match invocation.db_path.as_deref() {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };

    match invocation.command {
        Command::Ping => Ok(()),
        Command::AddAuthor { name, phone_number } => {
            let service = AuthorService::new(SqliteAuthorRepository::try_new(&conn)?);
            let author = service.create_author(&AuthorDraft::new(name, phone_number))?;
            println!("{}", serde_json::to_string(&author)?);
            Ok(())
        }
        Command::ListAuthors => {
            let service = AuthorService::new(SqliteAuthorRepository::try_new(&conn)?);
            for author in service.list_authors(&AuthorListQuery::default())? {
                println!("{}", serde_json::to_string(&author)?);
            }
            Ok(())
        }
        Command::AddPost { json_file } => {
            let service = post_service(&conn)?;
            let draft: PostDraft = serde_json::from_str(&std::fs::read_to_string(json_file)?)?;
            let post = service.create_post(&draft)?;
            println!("{}", serde_json::to_string(&post)?);
            Ok(())
        }
        Command::ListPosts { category } => {
            let service = post_service(&conn)?;
            let category = match category {
                Some(label) => Some(PostCategory::parse(Some(label.as_str()))?),
                None => None,
            };
            let query = PostListQuery {
                category,
                ..PostListQuery::default()
            };
            for post in service.list_posts(&query)? {
                println!("{}", serde_json::to_string(&post)?);
            }
            Ok(())
        }
    }
}

fn post_service(conn: &Connection) -> CliResult<PostService<SqlitePostRepository<'_>>> {
    let config = match std::env::var("BLOG_VALIDATION_CONFIG") {
        Ok(path) => ValidationConfig::load(path)?,
        Err(_) => ValidationConfig::default(),
    };
    Ok(PostService::new(SqlitePostRepository::try_with_config(
        conn, config,
    )?))
}
