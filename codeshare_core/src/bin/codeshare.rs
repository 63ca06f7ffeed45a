use std::env;
use std::fs;

use anyhow::{bail, Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use codeshare_core::codec::{decode_link, parse_line_range};
use codeshare_core::config::Config;
use codeshare_core::open::open_link;
use codeshare_core::share::share_selection;
use codeshare_core::{normalize::normalize, Error, ShareRequest};
use codeshare_stores::HttpSnippetStore;

#[derive(Debug, Parser)]
#[command(
    name = "codeshare",
    version,
    about = "Share code ranges as links and reopen them in local checkouts"
)]
struct Cli {
    /// Link host and snippet API base (overrides CODESHARE_BASE_URL).
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a link for a range of lines in a file.
    Share {
        /// File containing the selection.
        file: Utf8PathBuf,
        /// Line range, `N` or `N-M` (1-indexed, inclusive).
        #[arg(long)]
        lines: String,
        /// Language identifier used if the snippet fallback is taken.
        #[arg(long)]
        language: Option<String>,
        /// Also copy the link to the clipboard.
        #[arg(long)]
        copy: bool,
    },
    /// Resolve a link or `/open` URI to a file in a local workspace.
    Open {
        /// Share link or activation URI.
        link: String,
        /// Workspace folder to search; repeatable. Defaults to the current directory.
        #[arg(long = "workspace")]
        workspaces: Vec<Utf8PathBuf>,
        /// Print the resolved location as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the comparison form of remote URLs.
    Normalize {
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Decode a link and print it as JSON.
    Decode {
        /// Share or snippet link.
        link: String,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Share {
            file,
            lines,
            language,
            copy,
        } => share(&file, &lines, language, copy, cli.base_url.as_deref()),
        Command::Open {
            link,
            workspaces,
            json,
        } => open(&link, workspaces, json),
        Command::Normalize { urls } => {
            for url in urls {
                println!("{}", normalize(&url));
            }
            Ok(())
        }
        Command::Decode { link } => {
            let decoded = decode_link(&link).with_context(|| format!("failed to decode {link}"))?;
            println!("{}", serde_json::to_string_pretty(&decoded)?);
            Ok(())
        }
    }
}

fn share(
    file: &Utf8Path,
    lines: &str,
    language: Option<String>,
    copy: bool,
    base_url: Option<&str>,
) -> Result<()> {
    let mut config = Config::from_env()?;
    if let Some(base_url) = base_url {
        config = config.with_base_url(base_url)?;
    }

    let (start_line, end_line) =
        parse_line_range(lines).with_context(|| format!("invalid --lines value {lines:?}"))?;
    let contents =
        fs::read_to_string(file).with_context(|| format!("failed to read {file}"))?;
    let Some(text) = select_lines(&contents, start_line, end_line) else {
        bail!("{file} has fewer than {end_line} lines");
    };

    let request = ShareRequest {
        path: file.to_string(),
        start_line,
        end_line,
        text,
        language: language.unwrap_or_else(|| language_for(file).to_string()),
    };

    let store = HttpSnippetStore::with_timeout(&config.base_url, config.timeout)?;
    let shared = share_selection(&request, &config.base_url, &store)?;
    println!("{}", shared.url);

    if copy {
        let mut clipboard = arboard::Clipboard::new().context("clipboard is unavailable")?;
        clipboard
            .set_text(shared.url.clone())
            .context("failed to copy link to the clipboard")?;
        let kind = if shared.git_aware {
            "Git-aware link"
        } else {
            "snippet link"
        };
        eprintln!("Codeshare {kind} copied!");
    }

    Ok(())
}

fn open(link: &str, workspaces: Vec<Utf8PathBuf>, json: bool) -> Result<()> {
    let workspaces = if workspaces.is_empty() {
        let cwd = env::current_dir().context("failed to read the current directory")?;
        vec![Utf8PathBuf::try_from(cwd)?]
    } else {
        workspaces
    };

    match open_link(link, &workspaces) {
        Ok(target) if json => {
            println!("{}", serde_json::to_string_pretty(&target)?);
            Ok(())
        }
        Ok(target) => {
            println!("{}:{}-{}", target.path, target.start_line, target.end_line);
            Ok(())
        }
        Err(Error::NoMatchingWorkspace { target, examined }) => {
            eprintln!("Link URL:\n  {target}");
            eprintln!("Discovered remotes:");
            if examined.is_empty() {
                eprintln!("  none found in any open workspace");
            }
            for remote in &examined {
                eprintln!("  {remote}");
            }
            bail!("no workspace has a remote matching the link")
        }
        Err(err) => Err(err.into()),
    }
}

/// Lines `start..=end` (1-indexed) joined with `\n`.
fn select_lines(contents: &str, start: u32, end: u32) -> Option<String> {
    let lines: Vec<&str> = contents.lines().collect();
    let start = usize::try_from(start).ok()?.checked_sub(1)?;
    let end = usize::try_from(end).ok()?;
    lines.get(start..end).map(|selected| selected.join("\n"))
}

fn language_for(path: &Utf8Path) -> &'static str {
    let extension = path.extension().map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("rs") => "rust",
        Some("ts" | "mts" | "cts") => "typescript",
        Some("tsx") => "typescriptreact",
        Some("js" | "mjs" | "cjs") => "javascript",
        Some("jsx") => "javascriptreact",
        Some("py") => "python",
        Some("go") => "go",
        Some("java") => "java",
        Some("kt" | "kts") => "kotlin",
        Some("swift") => "swift",
        Some("c" | "h") => "c",
        Some("cc" | "cpp" | "cxx" | "hpp") => "cpp",
        Some("cs") => "csharp",
        Some("rb") => "ruby",
        Some("sh" | "bash") => "shellscript",
        Some("md") => "markdown",
        Some("json") => "json",
        Some("toml") => "toml",
        Some("yml" | "yaml") => "yaml",
        Some("html") => "html",
        Some("css") => "css",
        _ => "plaintext",
    }
}
