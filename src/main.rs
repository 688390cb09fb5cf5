//! Host-side dev runner: `cargo run -- [EXAMPLE]` builds the WASM bundle with
//! that example baked in, serves `static/`, and rebuilds when a shader changes.
//! Open pages poll `/__reload` and reload once a rebuild lands.

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    dev::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod dev {
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::{Component, Path, PathBuf};
    use std::process::Command;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;
    use std::time::{Duration, SystemTime};
    use std::{io, thread};

    use anyhow::{anyhow, bail, Context, Result};
    use clap::Parser;
    use shader_playground::config::EXAMPLE_ENV_VAR;
    use tiny_http::{Header, Response, Server};

    const POLL_INTERVAL: Duration = Duration::from_millis(100);

    /// Polled by `index.html`; answers with the current build generation.
    pub(crate) const RELOAD_ROUTE: &str = "/__reload";

    /// Counts successful rebuilds. Pages reload when the number changes.
    #[derive(Debug, Clone, Default)]
    pub(crate) struct BuildGeneration(Arc<AtomicU64>);

    impl BuildGeneration {
        pub(crate) fn current(&self) -> u64 {
            self.0.load(Ordering::SeqCst)
        }

        pub(crate) fn bump(&self) -> u64 {
            self.0.fetch_add(1, Ordering::SeqCst) + 1
        }
    }

    #[derive(Debug, PartialEq, Eq)]
    pub(crate) enum Reply {
        Generation(u64),
        File { path: PathBuf, body: Vec<u8> },
        NotFound,
    }

    #[derive(Parser, Debug, Clone)]
    #[command(name = "shader-playground", version, about = "Build and serve the shader playground")]
    pub struct Cli {
        /// Example to open when the page has no `?ex=` parameter (e.g. `01-gradient`).
        #[arg(value_name = "EXAMPLE", env = "SHADER_EXAMPLE")]
        pub example: Option<String>,

        /// Port for the local HTTP server.
        #[arg(long, env = "PLAYGROUND_PORT", default_value_t = 8000)]
        pub port: u16,

        /// Directory served over HTTP; the bundle goes to `<static-dir>/pkg`.
        #[arg(long, value_name = "DIR", default_value = "static")]
        pub static_dir: PathBuf,

        /// Directory holding the example shaders.
        #[arg(long, value_name = "DIR", default_value = "shaders")]
        pub shader_dir: PathBuf,

        /// Don't rebuild when shader files change.
        #[arg(long)]
        pub no_watch: bool,

        /// Serve whatever is already in `<static-dir>/pkg`.
        #[arg(long)]
        pub skip_build: bool,
    }

    pub fn run() -> Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        let cli = Cli::parse();

        if !cli.skip_build {
            build_bundle(&cli)?;
        }

        let generation = BuildGeneration::default();
        if !cli.no_watch {
            let watcher = cli.clone();
            let generation = generation.clone();
            thread::spawn(move || watch_shaders(&watcher, &generation));
        }

        serve(&cli, &generation)
    }

    /// Runs `wasm-pack` with `SHADER_EXAMPLE` set for the compile-time default.
    fn build_bundle(cli: &Cli) -> Result<()> {
        let out_dir = cli.static_dir.join("pkg");
        log::info!("building WASM bundle into {}", out_dir.display());

        let mut command = Command::new("wasm-pack");
        command.args(["build", "--release", "--target", "web", "--out-dir"]);
        command.arg(&out_dir);
        match &cli.example {
            Some(example) => {
                log::info!("default example: {example}");
                command.env(EXAMPLE_ENV_VAR, example);
            }
            None => {
                command.env_remove(EXAMPLE_ENV_VAR);
            }
        }

        let status = match command.status() {
            Ok(status) => status,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                bail!("wasm-pack not found in PATH (https://rustwasm.github.io/wasm-pack/)")
            }
            Err(err) => return Err(err).context("failed to run wasm-pack"),
        };
        if !status.success() {
            bail!("wasm-pack finished with {status}");
        }
        Ok(())
    }

    /// Polls shader modification times, rebuilds on any change, and bumps the
    /// generation so open pages reload.
    fn watch_shaders(cli: &Cli, generation: &BuildGeneration) {
        let mut known = snapshot(&cli.shader_dir);
        log::info!("watching {} shader files in {}", known.len(), cli.shader_dir.display());
        loop {
            thread::sleep(POLL_INTERVAL);
            let current = snapshot(&cli.shader_dir);
            let changed = changed_paths(&known, &current);
            if changed.is_empty() {
                continue;
            }
            for path in &changed {
                log::info!("change detected in {}, rebuilding", path.display());
            }
            known = current;
            match build_bundle(cli) {
                Ok(()) => {
                    let build = generation.bump();
                    log::info!("rebuilt (build {build}), reloading open pages");
                }
                Err(err) => log::error!("rebuild failed: {err:#}"),
            }
        }
    }

    fn snapshot(dir: &Path) -> BTreeMap<PathBuf, SystemTime> {
        let mut files = BTreeMap::new();
        collect_glsl(dir, &mut files);
        files
    }

    fn collect_glsl(dir: &Path, files: &mut BTreeMap<PathBuf, SystemTime>) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                collect_glsl(&path, files);
            } else if path.extension().is_some_and(|ext| ext == "glsl") {
                if let Ok(modified) = entry.metadata().and_then(|meta| meta.modified()) {
                    files.insert(path, modified);
                }
            }
        }
    }

    /// Paths added, removed, or modified between two snapshots.
    pub(crate) fn changed_paths(
        before: &BTreeMap<PathBuf, SystemTime>,
        after: &BTreeMap<PathBuf, SystemTime>,
    ) -> Vec<PathBuf> {
        let mut changed: Vec<PathBuf> = after
            .iter()
            .filter(|(path, modified)| before.get(*path) != Some(*modified))
            .map(|(path, _)| path.clone())
            .collect();
        changed.extend(before.keys().filter(|path| !after.contains_key(*path)).cloned());
        changed
    }

    fn serve(cli: &Cli, generation: &BuildGeneration) -> Result<()> {
        let server = Server::http(("127.0.0.1", cli.port)).map_err(|err| anyhow!(err))?;
        log::info!("serving {} at http://127.0.0.1:{}", cli.static_dir.display(), cli.port);

        for request in server.incoming_requests() {
            let response = match route(&cli.static_dir, request.url(), generation) {
                Reply::Generation(build) => Response::from_string(build.to_string())
                    .with_header(header("Content-Type", "text/plain"))
                    .with_header(header("Cache-Control", "no-store")),
                Reply::File { path, body } => {
                    let mime = mime_guess::from_path(&path).first_or_octet_stream();
                    Response::from_data(body).with_header(header("Content-Type", &mime.to_string()))
                }
                Reply::NotFound => {
                    log::debug!("404 {}", request.url());
                    Response::from_string("not found").with_status_code(404)
                }
            };
            if let Err(err) = request.respond(response) {
                log::warn!("failed to send response: {err}");
            }
        }
        Ok(())
    }

    fn header(name: &str, value: &str) -> Header {
        Header::from_bytes(name, value).expect("header names and values are ASCII")
    }

    /// Decides what a request URL gets: the build generation, a file, or 404.
    pub(crate) fn route(root: &Path, url: &str, generation: &BuildGeneration) -> Reply {
        let path = url.split(['?', '#']).next().unwrap_or_default();
        if path == RELOAD_ROUTE {
            return Reply::Generation(generation.current());
        }
        let Some(path) = resolve_path(root, url) else {
            return Reply::NotFound;
        };
        match fs::read(&path) {
            Ok(body) => Reply::File { path, body },
            Err(err) => {
                log::debug!("{}: {err}", path.display());
                Reply::NotFound
            }
        }
    }

    /// Maps a request URL onto a file under `root`, refusing `..` escapes.
    pub(crate) fn resolve_path(root: &Path, url: &str) -> Option<PathBuf> {
        let path = url.split(['?', '#']).next().unwrap_or_default();
        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|component| !matches!(component, Component::Normal(_)))
        {
            return None;
        }
        let mut full = root.join(relative);
        if relative.as_os_str().is_empty() || full.is_dir() {
            full.push("index.html");
        }
        Some(full)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn root_serves_index() {
            let root = Path::new("static");
            assert_eq!(resolve_path(root, "/"), Some(root.join("index.html")));
            assert_eq!(resolve_path(root, "/?ex=02-pointer"), Some(root.join("index.html")));
        }

        #[test]
        fn nested_files_resolve_under_root() {
            let root = Path::new("static");
            assert_eq!(
                resolve_path(root, "/pkg/shader_playground.js"),
                Some(root.join("pkg/shader_playground.js"))
            );
        }

        #[test]
        fn parent_components_are_rejected() {
            assert_eq!(resolve_path(Path::new("static"), "/../Cargo.toml"), None);
            assert_eq!(resolve_path(Path::new("static"), "/pkg/../../secret"), None);
        }

        #[test]
        fn reload_route_reports_build_generation() {
            let generation = BuildGeneration::default();
            let root = Path::new("static");
            assert_eq!(route(root, RELOAD_ROUTE, &generation), Reply::Generation(0));

            let watcher = generation.clone();
            assert_eq!(watcher.bump(), 1);
            assert_eq!(route(root, "/__reload?t=123", &generation), Reply::Generation(1));
        }

        #[test]
        fn route_serves_files_and_misses() {
            let root = std::env::temp_dir().join(format!("shader-playground-route-{}", std::process::id()));
            fs::create_dir_all(&root).unwrap();
            fs::write(root.join("index.html"), "<canvas id=\"c\"></canvas>").unwrap();
            let generation = BuildGeneration::default();

            match route(&root, "/?ex=01-gradient", &generation) {
                Reply::File { path, body } => {
                    assert_eq!(path, root.join("index.html"));
                    assert_eq!(body, b"<canvas id=\"c\"></canvas>");
                }
                other => panic!("expected index.html, got {other:?}"),
            }
            assert_eq!(route(&root, "/missing.js", &generation), Reply::NotFound);
            assert_eq!(route(&root, "/../Cargo.toml", &generation), Reply::NotFound);

            fs::remove_dir_all(&root).ok();
        }

        #[test]
        fn detects_added_modified_and_removed_files() {
            let t0 = SystemTime::UNIX_EPOCH;
            let t1 = t0 + Duration::from_secs(1);
            let before = BTreeMap::from([
                (PathBuf::from("a/frag.glsl"), t0),
                (PathBuf::from("b/frag.glsl"), t0),
            ]);
            let after = BTreeMap::from([
                (PathBuf::from("a/frag.glsl"), t1),
                (PathBuf::from("c/frag.glsl"), t0),
            ]);
            let mut changed = changed_paths(&before, &after);
            changed.sort();
            assert_eq!(
                changed,
                vec![
                    PathBuf::from("a/frag.glsl"),
                    PathBuf::from("b/frag.glsl"),
                    PathBuf::from("c/frag.glsl"),
                ]
            );
            assert!(changed_paths(&before, &before).is_empty());
        }
    }
}
