//! Headless room editor: replays a JSON command script against a project
//! and prints one JSON response per command.
//!
//! ```text
//! room-editor [--project FILE] [--script FILE] [--assets DIR] [--save-dir DIR] [--seed N]
//! ```

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    cli::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::io::Read;
    use std::path::PathBuf;

    use room_editor_lib::assets::{DeferredLoader, FsModelLoader, ModelLoader};
    use room_editor_lib::catalog::Catalog;
    use room_editor_lib::command::{execute_command, CommandResponse, EditorCommand};
    use room_editor_lib::project::{FileStore, KeyValueStore, MemoryStore};
    use room_editor_lib::state::EditorSettings;
    use room_editor_lib::viewport::Viewport;
    use room_editor_lib::EditorSession;
    use shared::{Project, SizeClass};

    #[derive(Debug, Default)]
    struct Args {
        project: Option<PathBuf>,
        script: Option<PathBuf>,
        assets: Option<PathBuf>,
        save_dir: Option<PathBuf>,
        seed: Option<u64>,
    }

    fn parse_args() -> Args {
        let args: Vec<String> = std::env::args().collect();
        let mut parsed = Args::default();
        let mut i = 1;
        while i < args.len() {
            let value = args.get(i + 1).cloned();
            match (args[i].as_str(), value) {
                ("--project", Some(v)) => parsed.project = Some(v.into()),
                ("--script", Some(v)) => parsed.script = Some(v.into()),
                ("--assets", Some(v)) => parsed.assets = Some(v.into()),
                ("--save-dir", Some(v)) => parsed.save_dir = Some(v.into()),
                ("--seed", Some(v)) => match v.parse() {
                    Ok(seed) => parsed.seed = Some(seed),
                    Err(e) => tracing::error!("Invalid --seed {v}: {e}"),
                },
                (other, _) => {
                    tracing::warn!("Ignoring argument {other}");
                    i += 1;
                    continue;
                }
            }
            i += 2;
        }
        parsed
    }

    fn load_project(path: &PathBuf) -> Option<Project> {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Project>(&json) {
                Ok(project) => {
                    tracing::info!(
                        "Loaded project from {} ({} objects)",
                        path.display(),
                        project.object_count()
                    );
                    Some(project)
                }
                Err(e) => {
                    tracing::error!("Failed to parse project JSON from {}: {e}", path.display());
                    None
                }
            },
            Err(e) => {
                tracing::error!("Failed to read project file {}: {e}", path.display());
                None
            }
        }
    }

    fn read_script(path: Option<&PathBuf>) -> std::io::Result<String> {
        match path {
            Some(path) => std::fs::read_to_string(path),
            None => {
                let mut script = String::new();
                std::io::stdin().read_to_string(&mut script)?;
                Ok(script)
            }
        }
    }

    fn print(response: &CommandResponse) {
        match serde_json::to_string(response) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::error!("Failed to encode response: {e}"),
        }
    }

    pub fn run() {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "room_editor=info,room_editor_lib=info".into()),
            )
            .init();

        let args = parse_args();

        let mut settings = EditorSettings::load();
        if args.seed.is_some() {
            settings.seed = args.seed;
        }

        let store: Box<dyn KeyValueStore> = match args.save_dir.clone() {
            Some(dir) => Box::new(FileStore::new(dir)),
            None => match FileStore::default_location() {
                Some(store) => Box::new(store),
                None => Box::new(MemoryStore::new()),
            },
        };

        let flush = args.assets.is_some();
        let loader: Box<dyn ModelLoader> = match args.assets.clone() {
            Some(root) => match FsModelLoader::new(root) {
                Ok(loader) => Box::new(loader),
                Err(e) => {
                    tracing::error!("Failed to start model loader: {e}");
                    return;
                }
            },
            None => Box::new(DeferredLoader::new()),
        };

        let mut session = EditorSession::new(Catalog::builtin(), settings, store, loader);

        let project = match args.project.as_ref().and_then(load_project) {
            Some(project) => project,
            None => match session.store_mut().create("Untitled", SizeClass::Medium) {
                Ok(project) => project,
                Err(e) => {
                    tracing::error!("Failed to create project: {e}");
                    return;
                }
            },
        };
        if let Err(e) = session.open(project, Viewport::new(1280.0, 720.0)) {
            tracing::error!("Failed to open project: {e}");
            return;
        }

        let script = match read_script(args.script.as_ref()) {
            Ok(script) => script,
            Err(e) => {
                tracing::error!("Failed to read script: {e}");
                return;
            }
        };
        let commands: Vec<EditorCommand> = match serde_json::from_str(&script) {
            Ok(commands) => commands,
            Err(e) => {
                tracing::error!("Invalid commands JSON: {e}");
                return;
            }
        };

        tracing::info!("Running {} commands", commands.len());
        for cmd in commands {
            let response = execute_command(&mut session, cmd);
            if flush {
                session.flush_loads();
            }
            print(&response);
        }
    }
}
