use clap::{CommandFactory, Parser};
use remind_cli::cli::{Cli, Command, collect_overrides};
use remind_cli::output;
use remind_core::config::{Config, load_config_with_fallback, merge_overrides};
use remind_core::error::AppError;
use remind_core::notify::{NoopNotifier, Notifier, notifier_from_env};
use remind_core::session::{Reminders, Snapshot};
use remind_core::task_api::TaskStore;
use std::io::{self, BufRead};
use std::time::Duration;

fn print_tasks(snapshot: &Snapshot, json: bool) {
    if json {
        println!("{}", output::tasks_json(snapshot));
    } else {
        println!("{}", output::render_tasks(snapshot, output::local_offset()));
    }
}

fn print_upcoming(snapshot: &Snapshot, json: bool) {
    if json {
        println!("{}", output::upcoming_json(snapshot));
    } else {
        println!("{}", output::render_upcoming(snapshot, output::local_offset()));
    }
}

fn report_transition(snapshot: &Snapshot) {
    if let Some(state) = snapshot.transition {
        println!("{}", output::transition_line(state, snapshot));
    }
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_argument(message)
}

fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escape = false;

    for ch in line.chars() {
        if escape {
            if ch != '"' && ch != '\\' {
                current.push('\\');
            }
            current.push(ch);
            escape = false;
            continue;
        }

        if in_quotes && ch == '\\' {
            escape = true;
            continue;
        }

        if ch == '"' {
            in_quotes = !in_quotes;
            continue;
        }

        if ch.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                args.push(std::mem::take(&mut current));
            }
            continue;
        }

        current.push(ch);
    }

    if in_quotes {
        return Err(AppError::invalid_argument("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn desktop_notifier(config: &Config) -> Box<dyn Notifier> {
    if !config.notifications {
        return Box::new(NoopNotifier);
    }

    match notifier_from_env() {
        Ok(notifier) => notifier,
        Err(err) => {
            log::warn!("desktop notifications disabled: {err}");
            Box::new(NoopNotifier)
        }
    }
}

fn open_session(
    config: &Config,
    notifier: Box<dyn Notifier>,
) -> Result<(Reminders, Snapshot), AppError> {
    let path = config.resolve_store_path()?;
    log::debug!("using store {}", path.display());
    Ok(Reminders::open(TaskStore::new(path), notifier))
}

fn run_watch(reminders: &mut Reminders, interval: Duration, count: Option<u64>) {
    println!(
        "watching {} every {}s ({})",
        reminders.store().path().display(),
        interval.as_secs(),
        reminders.urgency().label()
    );

    let mut polls = 0;
    while count.is_none_or(|limit| polls < limit) {
        std::thread::sleep(interval);
        let snapshot = reminders.tick();
        report_transition(&snapshot);
        polls += 1;
    }
}

fn run_command(
    command: Command,
    json: bool,
    config: &Config,
    reminders: &mut Reminders,
    current: Snapshot,
) -> Result<(), AppError> {
    match command {
        Command::Add { text } => {
            let text = match text {
                Some(value) if !value.trim().is_empty() => value,
                _ => return Err(AppError::invalid_argument("text is required")),
            };
            let snapshot = reminders.add_task(&text);
            print_tasks(&snapshot, json);
            report_transition(&snapshot);
        }
        Command::Edit { index, text } => {
            let snapshot = reminders.edit_task(index, &text);
            print_tasks(&snapshot, json);
            report_transition(&snapshot);
        }
        Command::Delete { index } => {
            let snapshot = reminders.delete_task(index);
            print_tasks(&snapshot, json);
            report_transition(&snapshot);
        }
        Command::Done { index, undo } => {
            let snapshot = reminders.set_done(index, !undo);
            print_tasks(&snapshot, json);
            report_transition(&snapshot);
        }
        Command::Snooze { index } => {
            let snapshot = reminders.snooze_task(index);
            print_tasks(&snapshot, json);
            report_transition(&snapshot);
        }
        Command::List => print_tasks(&current, json),
        Command::Upcoming => print_upcoming(&current, json),
        Command::Status => {
            if json {
                println!("{}", output::status_json(current.urgency));
            } else {
                println!("{}", current.urgency.label());
            }
        }
        Command::Watch { interval, count } => {
            report_transition(&current);
            let secs = interval.unwrap_or(config.poll_interval_secs);
            run_watch(reminders, Duration::from_secs(secs), count);
        }
    }

    Ok(())
}

fn run_once(cli: Cli, config: &Config) -> Result<(), AppError> {
    let notifier: Box<dyn Notifier> = if matches!(cli.command, Command::Watch { .. }) {
        desktop_notifier(config)
    } else {
        Box::new(NoopNotifier)
    };
    let (mut reminders, snapshot) = open_session(config, notifier)?;
    run_command(cli.command, cli.json, config, &mut reminders, snapshot)
}

fn run_interactive(config: &Config) -> Result<(), AppError> {
    let (mut reminders, opened) = open_session(config, desktop_notifier(config))?;
    report_transition(&opened);

    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {}", err);
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("remind".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                continue;
            }
        };

        // One session spans the whole input, so each flip is reported once.
        let snapshot = reminders.tick();
        report_transition(&snapshot);

        if let Err(err) = run_command(cli.command, cli.json, config, &mut reminders, snapshot) {
            eprintln!("ERROR: {}", err);
        }
    }

    Ok(())
}

fn init_logging(config: &Config) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_level()))
        .format_timestamp_millis()
        .init();
}

fn main() {
    let loaded = load_config_with_fallback();

    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        init_logging(&loaded.config);
        if let Some(err) = loaded.error {
            log::warn!("using default configuration: {err}");
        }
        if let Err(err) = run_interactive(&loaded.config) {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            if matches!(
                err.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            ) {
                err.exit();
            }
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    let config = match collect_overrides(&cli.config_override) {
        Ok(overrides) => merge_overrides(&loaded.config, &overrides),
        Err(message) => {
            eprintln!("ERROR: {}", AppError::invalid_argument(message));
            std::process::exit(1);
        }
    };

    init_logging(&config);
    if let Some(err) = loaded.error {
        log::warn!("using default configuration: {err}");
    }

    if let Err(err) = run_once(cli, &config) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
