use orange_connect::config::Settings;
use orange_connect::core::display::{
    service_type_badge, support_menu_glyph, swipe_hint_label, user_role_badge,
};
use orange_connect::core::OverlayKind;
use orange_connect::intents::{dispatch, AppError, AppState, Intent};
use orange_connect::models::{
    AvailableTime, CoordinatorRecord, IntentResponse, Notice, ServiceType, SupportMenu, Tag,
};
use orange_connect::services::CoordinatorDirectory;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), AppError> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load()?;
    init_logging(&settings);

    let json_output = std::env::args().any(|arg| arg == "--json");

    info!("Starting Orange Connect terminal driver");

    let directory = Arc::new(CoordinatorDirectory::builtin());
    let mut state = AppState::new(directory, settings.app_options());

    info!(
        "Loaded {} coordinators, commit threshold {}",
        state.session.directory().len(),
        settings.gesture.commit_threshold
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    render(&mut stdout, &state, &state.response(), json_output)?;

    for line in stdin.lock().lines() {
        let line = line?;
        match line.trim() {
            "quit" | "exit" => break,
            "help" => {
                writeln!(stdout, "{}", HELP)?;
                continue;
            }
            "config" => {
                match settings.to_toml() {
                    Ok(rendered) => writeln!(stdout, "{}", rendered)?,
                    Err(e) => error!("Failed to render configuration: {}", e),
                }
                continue;
            }
            _ => {}
        }

        let intents = match Intent::parse_command(&line) {
            Ok(intents) => intents,
            Err(e) => {
                writeln!(stdout, "⚠️  {}", e)?;
                continue;
            }
        };

        for intent in intents {
            let response = dispatch(&mut state, intent, Instant::now());
            render(&mut stdout, &state, &response, json_output)?;
        }
    }

    info!("Session ended with {} matches", state.session.matches().len());
    Ok(())
}

fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.logging.level.clone()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "json" {
        subscriber.json().init();
    } else {
        subscriber.pretty().init();
    }
}

const HELP: &str = "\
commands:
  skip | match                 decide on the current card
  drag <dx> | down <x> | move <x> | up | cancel
  filter | apply service=.. menu=.. time=.. | clear
  menu | matches | settings | profile [id] | close
  user <self|family> <name>    update settings
  chat | call | dismiss        match modal actions
  show | tick | config | help | quit
  {\"intent\": ...}              raw JSON intent";

fn render<W: Write>(
    out: &mut W,
    state: &AppState,
    response: &IntentResponse,
    json_output: bool,
) -> Result<(), AppError> {
    if json_output {
        writeln!(out, "{}", serde_json::to_string(response)?)?;
        return Ok(());
    }

    if let Some(notice) = &response.notice {
        match notice {
            Notice::Rejected { reason } => writeln!(out, "⚠️  {}", reason)?,
            Notice::Blocked { overlay } => writeln!(out, "⚠️  close the {:?} first", overlay)?,
            Notice::Invalid { message } => writeln!(out, "⚠️  {}", message)?,
            Notice::ComingSoon { feature } => writeln!(out, "🚧 {} は今後実装予定です", feature)?,
        }
    }

    if let Some(feedback) = &response.feedback {
        match feedback.hint {
            Some(direction) => writeln!(
                out,
                "  ← {} ({:+.0})",
                swipe_hint_label(direction),
                feedback.offset
            )?,
            None => writeln!(out, "  ({:+.0})", feedback.offset)?,
        }
        return Ok(());
    }

    let snapshot = &response.snapshot;

    match response.overlay {
        OverlayKind::MatchModal => {
            if let Some(event) = &response.match_event {
                writeln!(out, "🎉 マッチング成立！ {}さんとマッチングしました", event.coordinator.name)?;
                let coordinator = &event.coordinator;
                writeln!(
                    out,
                    "   {} {} / {}",
                    coordinator.avatar, coordinator.experience, coordinator.location
                )?;
                writeln!(out, "   chat / call / dismiss")?;
            }
            return Ok(());
        }
        OverlayKind::FilterPanel => {
            writeln!(out, "絞り込み検索")?;
            writeln!(out, "  service: {}", options::<ServiceType>())?;
            writeln!(out, "  menu:    {}", options::<SupportMenu>())?;
            writeln!(out, "  time:    {}", options::<AvailableTime>())?;
            return Ok(());
        }
        OverlayKind::Menu => {
            writeln!(out, "メニュー: matches (マッチング一覧) / settings (設定) / close")?;
            return Ok(());
        }
        OverlayKind::MatchList => {
            let matched = state.session.matched_coordinators();
            if matched.is_empty() {
                writeln!(out, "💔 まだマッチングがありません")?;
            } else {
                writeln!(out, "マッチング数: {} 件", matched.len())?;
                for coordinator in matched {
                    writeln!(
                        out,
                        "  [{}] {} {} {}",
                        coordinator.id, coordinator.avatar, coordinator.name, coordinator.location
                    )?;
                }
            }
            return Ok(());
        }
        OverlayKind::Settings => {
            writeln!(
                out,
                "設定: {} [{}] ({})",
                response.user.name,
                response.user.role.label(),
                user_role_badge(response.user.role).css_classes()
            )?;
            return Ok(());
        }
        OverlayKind::ProfileDetail => {
            if let orange_connect::Overlay::ProfileDetail { coordinator_id } = &state.overlay {
                if let Some(coordinator) = state.session.directory().get(coordinator_id) {
                    render_card(out, coordinator)?;
                    writeln!(out, "   趣味: {}", coordinator.hobbies.join("、"))?;
                }
            }
            return Ok(());
        }
        OverlayKind::None => {}
    }

    if snapshot.filters_active {
        writeln!(out, "🔍 絞り込み条件が適用されています ({} 件)", snapshot.queue.len())?;
    }

    match (&snapshot.current, snapshot.position) {
        (Some(coordinator), Some(position)) => {
            render_card(out, coordinator)?;
            writeln!(
                out,
                "   {} / {}   マッチ数: {} 件",
                position.index,
                position.total,
                snapshot.matches.len()
            )?;
        }
        _ => {
            writeln!(out, "🎉 すべてのコーディネーターを確認しました")?;
            writeln!(out, "   マッチ数: {} 件", snapshot.matches.len())?;
        }
    }

    Ok(())
}

fn render_card<W: Write>(out: &mut W, coordinator: &CoordinatorRecord) -> Result<(), AppError> {
    writeln!(
        out,
        "{} {} ({}) [{}] {}",
        coordinator.avatar,
        coordinator.name,
        coordinator.age,
        coordinator.service_type,
        service_type_badge(coordinator.service_type).css_classes()
    )?;
    writeln!(out, "   {} / {}", coordinator.experience, coordinator.location)?;
    writeln!(out, "   {}", coordinator.description)?;

    let menus: Vec<String> = coordinator
        .support_menus
        .iter()
        .map(|menu| format!("{}{}", support_menu_glyph(*menu), menu))
        .collect();
    writeln!(out, "   {}", menus.join(" "))?;

    let times: Vec<&str> = coordinator.available_times.iter().map(|t| t.label()).collect();
    writeln!(out, "   🕐 {}", times.join(" / "))?;
    Ok(())
}

fn options<T: Tag>() -> String {
    T::ALL
        .iter()
        .map(|tag| format!("{}({})", tag.label(), tag.key()))
        .collect::<Vec<_>>()
        .join(" ")
}
