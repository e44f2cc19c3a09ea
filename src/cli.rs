use std::env;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::compile::compile;
use crate::render::helpers::{read_json, read_text, write_artifact};
use crate::service::SurveyService;
use crate::settings::{load_settings, GeneratorSettings};
use crate::store::{MemoryRepository, SqliteRepository, SurveyRepository};
use crate::survey::parse::parse_definition;

pub const DB_ENV: &str = "SURVEY_OVERLAY_DB";
pub const SETTINGS_ENV: &str = "SURVEY_OVERLAY_SETTINGS";

#[derive(Debug, Clone, PartialEq)]
enum CliCommand {
    Compile { file: PathBuf, out: Option<PathBuf> },
    Create { file: PathBuf },
    Get { id: String },
    List,
    Update { id: String, file: PathBuf },
    Delete { id: String },
    Generate { id: String, out: Option<PathBuf> },
}

pub fn run_from_env() -> Result<(), String> {
    run_from_args(env::args().skip(1).collect())
}

pub fn run_from_args(args: Vec<String>) -> Result<(), String> {
    let command = parse_command(args)?;
    let settings = settings_from_env()?;

    let service = || -> Result<SurveyService, String> {
        SurveyService::new(repository_from_env()?, settings.clone()).map_err(|e| e.to_string())
    };
    let (envelope, out) = match command {
        CliCommand::Compile { file, out } => {
            return compile_file(&file, out.as_deref(), &settings);
        }
        CliCommand::Create { file } => (service()?.create(read_json(&file)?), None),
        CliCommand::Get { id } => (service()?.get(&id), None),
        CliCommand::List => (service()?.list(), None),
        CliCommand::Update { id, file } => (service()?.update(&id, read_json(&file)?), None),
        CliCommand::Delete { id } => (service()?.delete(&id), None),
        CliCommand::Generate { id, out } => (service()?.generate(&id), out),
    };

    if let (Some(out), Some(code)) = (out, envelope["code"].as_str()) {
        write_artifact(&out, code)?;
        println!("wrote {}", out.display());
    } else {
        let pretty = serde_json::to_string_pretty(&envelope).map_err(|e| e.to_string())?;
        println!("{pretty}");
    }

    if envelope["success"] == true {
        Ok(())
    } else {
        Err(envelope["error"].as_str().unwrap_or("operation failed").to_string())
    }
}

fn settings_from_env() -> Result<GeneratorSettings, String> {
    match env::var(SETTINGS_ENV) {
        Ok(path) if !path.trim().is_empty() => {
            debug!(path = %path, "loading generator settings");
            load_settings(Path::new(&path)).map_err(|e| e.to_string())
        }
        _ => Ok(GeneratorSettings::default()),
    }
}

fn repository_from_env() -> Result<Box<dyn SurveyRepository>, String> {
    repository_for(env::var(DB_ENV).ok().as_deref())
}

fn repository_for(db_path: Option<&str>) -> Result<Box<dyn SurveyRepository>, String> {
    match db_path.map(str::trim).filter(|path| !path.is_empty()) {
        Some(path) => {
            let repo = SqliteRepository::open(Path::new(path)).map_err(|e| e.to_string())?;
            Ok(Box::new(repo))
        }
        None => {
            warn!("{DB_ENV} is not set; surveys are kept in memory and lost when this command exits");
            Ok(Box::new(MemoryRepository::new()))
        }
    }
}

fn compile_file(file: &Path, out: Option<&Path>, settings: &GeneratorSettings) -> Result<(), String> {
    let raw = read_text(file)?;
    let def = parse_definition(&raw).map_err(|e| e.to_string())?;
    let bundle = compile(&def, settings).map_err(|e| e.to_string())?;
    match out {
        Some(out) => {
            write_artifact(out, &bundle.html)?;
            println!("wrote {} ({})", out.display(), bundle.sha256);
        }
        None => println!("{}", bundle.html),
    }
    Ok(())
}

fn parse_command(args: Vec<String>) -> Result<CliCommand, String> {
    if args.is_empty() {
        return Err(help_text());
    }

    let cmd = args[0].as_str();
    let (positional, out) = split_args(&args[1..])?;
    let take = |index: usize, what: &str| {
        positional
            .get(index)
            .cloned()
            .ok_or_else(|| format!("{cmd} requires {what}"))
    };
    let expect_arity = |count: usize| {
        if positional.len() > count {
            Err(format!("{cmd}: unexpected argument {}", positional[count]))
        } else {
            Ok(())
        }
    };
    let no_out = || {
        if out.is_some() {
            Err(format!("{cmd} does not accept --out"))
        } else {
            Ok(())
        }
    };

    match cmd {
        "compile" => {
            expect_arity(1)?;
            Ok(CliCommand::Compile {
                file: PathBuf::from(take(0, "FILE")?),
                out: out.clone(),
            })
        }
        "create" => {
            expect_arity(1)?;
            no_out()?;
            Ok(CliCommand::Create {
                file: PathBuf::from(take(0, "FILE")?),
            })
        }
        "get" => {
            expect_arity(1)?;
            no_out()?;
            Ok(CliCommand::Get { id: take(0, "ID")? })
        }
        "list" => {
            expect_arity(0)?;
            no_out()?;
            Ok(CliCommand::List)
        }
        "update" => {
            expect_arity(2)?;
            no_out()?;
            Ok(CliCommand::Update {
                id: take(0, "ID")?,
                file: PathBuf::from(take(1, "FILE")?),
            })
        }
        "delete" => {
            expect_arity(1)?;
            no_out()?;
            Ok(CliCommand::Delete { id: take(0, "ID")? })
        }
        "generate" => {
            expect_arity(1)?;
            Ok(CliCommand::Generate {
                id: take(0, "ID")?,
                out: out.clone(),
            })
        }
        "help" | "--help" | "-h" => Err(help_text()),
        _ => Err(format!("unknown command: {cmd}\n\n{}", help_text())),
    }
}

fn split_args(args: &[String]) -> Result<(Vec<String>, Option<PathBuf>), String> {
    let mut positional = Vec::new();
    let mut out = None;

    let mut i = 0usize;
    while i < args.len() {
        let token = &args[i];
        match token.as_str() {
            "--out" => {
                i += 1;
                out = Some(PathBuf::from(
                    args.get(i)
                        .ok_or_else(|| "--out requires a value".to_string())?,
                ));
            }
            x if x.starts_with("--") => return Err(format!("unknown flag: {x}")),
            _ => positional.push(token.clone()),
        }
        i += 1;
    }
    Ok((positional, out))
}

fn help_text() -> String {
    [
        "survey-overlay",
        "",
        "Commands:",
        "  survey-overlay compile FILE [--out overlay.html]",
        "  survey-overlay create FILE",
        "  survey-overlay get ID",
        "  survey-overlay list",
        "  survey-overlay update ID FILE",
        "  survey-overlay delete ID",
        "  survey-overlay generate ID [--out overlay.html]",
        "",
        "Environment:",
        "  SURVEY_OVERLAY_DB        SQLite file for stored surveys; when unset, surveys",
        "                           live only for the current command",
        "  SURVEY_OVERLAY_SETTINGS  generator settings JSON (defaults when unset)",
        "  RUST_LOG                 log filter, default survey_overlay=info",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_every_command() {
        assert_eq!(
            parse_command(args(&["compile", "survey.json", "--out", "o.html"])),
            Ok(CliCommand::Compile {
                file: PathBuf::from("survey.json"),
                out: Some(PathBuf::from("o.html")),
            })
        );
        assert_eq!(parse_command(args(&["list"])), Ok(CliCommand::List));
        assert_eq!(
            parse_command(args(&["update", "abc", "patch.json"])),
            Ok(CliCommand::Update {
                id: "abc".to_string(),
                file: PathBuf::from("patch.json"),
            })
        );
        assert_eq!(
            parse_command(args(&["generate", "abc"])),
            Ok(CliCommand::Generate {
                id: "abc".to_string(),
                out: None,
            })
        );
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse_command(Vec::new()).is_err());
        assert!(parse_command(args(&["get"])).unwrap_err().contains("requires ID"));
        assert!(parse_command(args(&["list", "extra"])).is_err());
        assert!(parse_command(args(&["delete", "a", "--out", "x"])).is_err());
        assert!(parse_command(args(&["compile", "f", "--verbose"])).is_err());
        assert!(parse_command(args(&["publish"])).unwrap_err().starts_with("unknown command"));
    }

    #[test]
    fn compile_file_writes_document() {
        let tmp = std::env::temp_dir().join(format!("cli-test-{}", Uuid::new_v4()));
        let input = tmp.join("survey.json");
        let output = tmp.join("out").join("overlay.html");
        write_artifact(
            &input,
            r#"{"title": "CLI", "questions": [{"type": "text", "text": "Why?"}]}"#,
        )
        .expect("write input");

        compile_file(&input, Some(&output), &GeneratorSettings::default()).expect("compile");
        let html = read_text(&output).expect("read output");
        assert!(html.contains("<title>CLI</title>"));
        assert!(html.contains("text-submit-1"));

        let _ = std::fs::remove_dir_all(tmp);
    }

    #[test]
    fn surveys_survive_between_commands_only_with_a_database() {
        let tmp = std::env::temp_dir().join(format!("cli-test-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&tmp).expect("tmp");
        let db = tmp.join("surveys.sqlite3");
        let db = db.to_str().expect("utf-8 path");

        let id = repository_for(Some(db))
            .expect("open")
            .create(serde_json::json!({"title": "Kept"}))
            .expect("create")
            .id;
        let reopened = repository_for(Some(db)).expect("reopen");
        assert_eq!(reopened.get_by_id(&id).expect("get").title.as_deref(), Some("Kept"));

        let id = repository_for(None)
            .expect("memory")
            .create(serde_json::json!({"title": "Lost"}))
            .expect("create")
            .id;
        assert!(repository_for(Some("  ")).expect("memory").get_by_id(&id).is_err());

        let _ = std::fs::remove_dir_all(tmp);
    }
}
