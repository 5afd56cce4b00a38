use app::{AppBuilder, Application, BoxError, LOG_MAIN};
use bevy::{log::LogPlugin, prelude::*, window::CompositeAlphaMode};
use hero_banner::HeroBannerPlugin;
use hero_banner::settings::BannerSettings;

struct HeroBannerApp;

impl Application for HeroBannerApp {
    const APP_ID: &'static str = "hero_banner";
}

fn main() -> Result<(), BoxError> {
    let mut banner = AppBuilder::<HeroBannerApp>::new(env!("CARGO_PKG_VERSION"))?
        .build_with_bevy(|mut app, ctx| {
            let settings = BannerSettings::load_or_default(&ctx.path_context().settings_file());
            info!(
                target: LOG_MAIN,
                "{} particles, {} icons", settings.particles.count, settings.icons.entries.len()
            );

            let transparent = settings.window.transparent_background;
            app.add_plugins(
                DefaultPlugins
                    .build()
                    // tracing is already set up by AppBuilder
                    .disable::<LogPlugin>()
                    .set(WindowPlugin {
                        primary_window: Some(Window {
                            title: settings.window.title.clone(),
                            transparent,
                            composite_alpha_mode: if transparent {
                                CompositeAlphaMode::PostMultiplied
                            } else {
                                CompositeAlphaMode::Auto
                            },
                            ..default()
                        }),
                        ..default()
                    }),
            );
            app.add_plugins(HeroBannerPlugin::new(settings));
            app
        });

    banner.run();
    Ok(())
}
