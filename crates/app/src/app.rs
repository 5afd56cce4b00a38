use paths::PathContext;
use std::marker::PhantomData;
use std::path::Path;
#[cfg(debug_assertions)]
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    Layer, filter::LevelFilter, filter::filter_fn, fmt, layer::SubscriberExt,
    util::SubscriberInitExt,
};

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub const LOG_MAIN: &str = "main";
pub const LOG_SCENE: &str = "banner/scene";
pub const LOG_ASSETS: &str = "banner/assets";
pub const LOG_INPUT: &str = "banner/input";

/// Paths plus the file logger's worker guard. Dropping it flushes and stops
/// the logger, so it lives as long as the app.
pub struct AppContext {
    path_context: PathContext,
    _log_guard: WorkerGuard,
}

impl AppContext {
    pub fn path_context(&self) -> &PathContext {
        &self.path_context
    }
}

/// Application identity.
pub trait Application: Sized + 'static {
    const APP_ID: &'static str;
    const OWNER: &'static str = "portfolio";
}

/// Prepares directories and logging before handing out the app.
pub struct AppBuilder<A: Application> {
    context: AppContext,
    _marker: PhantomData<A>,
}

impl<A: Application> AppBuilder<A> {
    /// Resolves paths, creates the directories and installs the global
    /// tracing subscriber.
    pub fn new(version: &'static str) -> Result<Self, BoxError> {
        #[cfg(debug_assertions)]
        let path_context = PathContext::with_base_path(
            PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("..")
                .join("..")
                .join(".out"),
            A::OWNER,
            A::APP_ID,
        );
        #[cfg(not(debug_assertions))]
        let path_context = PathContext::new(A::OWNER, A::APP_ID);

        path_context.ensure_directories()?;
        let guard = install_tracing(&path_context.log_file_now())?;

        tracing::info!(
            target: LOG_MAIN,
            "{}/{} v{} starting ({:?}), data in {:?}",
            path_context.owner(),
            path_context.app_id(),
            version,
            path_context.environment(),
            path_context.app_root()
        );

        Ok(Self {
            context: AppContext {
                path_context,
                _log_guard: guard,
            },
            _marker: PhantomData,
        })
    }

    /// Hands a fresh Bevy `App` and the context to `configure` and keeps the
    /// context alive next to the configured app.
    #[cfg(feature = "bevy")]
    pub fn build_with_bevy(
        self,
        configure: impl FnOnce(bevy::prelude::App, &AppContext) -> bevy::prelude::App,
    ) -> BevyApp<A> {
        let app = configure(bevy::prelude::App::new(), &self.context);
        BevyApp {
            _context: self.context,
            app,
            _marker: PhantomData,
        }
    }
}

/// Console plus a non-blocking writer into `log_file`, both at INFO in debug
/// builds and WARN in release builds.
fn install_tracing(log_file: &Path) -> Result<WorkerGuard, BoxError> {
    let log_dir = log_file
        .parent()
        .ok_or("log file path has no parent directory")?;
    let log_name = log_file
        .file_name()
        .ok_or("log file path has no file name")?;
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(log_dir, log_name));

    let level = if cfg!(debug_assertions) {
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    };

    let file_layer = fmt::Layer::default()
        .with_target(true)
        .with_ansi(false)
        .with_writer(writer)
        .with_filter(filter_fn(move |metadata| metadata.level() <= &level));
    let console_layer = fmt::Layer::default()
        .with_target(true)
        .with_filter(filter_fn(move |metadata| metadata.level() <= &level));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()?;
    Ok(guard)
}

#[cfg(feature = "bevy")]
pub struct BevyApp<A: Application> {
    _context: AppContext,
    pub app: bevy::prelude::App,
    _marker: PhantomData<A>,
}

#[cfg(feature = "bevy")]
impl<A: Application> BevyApp<A> {
    pub fn run(&mut self) {
        self.app.run();
    }
}
