use anyhow::{anyhow, Result};
use clap::{App as Cli, AppSettings, Arg, ArgMatches, SubCommand};
use log::LevelFilter;
use todolist_client::api::LoginArgs;
use todolist_client::app::App;
use todolist_client::config::Config;
use todolist_client::events::network::{Event, Outcome};
use todolist_client::logger;
use todolist_client::state::State;

fn cli() -> Cli<'static, 'static> {
    Cli::new("todolist")
        .about("Manage todo-lists of the todolist API from the terminal")
        .version(env!("CARGO_PKG_VERSION"))
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Custom configuration directory")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Log debug output to stderr"),
        )
        .subcommand(SubCommand::with_name("status").about("Show session status"))
        .subcommand(
            SubCommand::with_name("login")
                .about("Log in and remember the session")
                .arg(Arg::with_name("email").long("email").takes_value(true).required(true))
                .arg(
                    Arg::with_name("password")
                        .long("password")
                        .takes_value(true)
                        .required(true),
                )
                .arg(Arg::with_name("remember-me").long("remember-me"))
                .arg(Arg::with_name("captcha").long("captcha").takes_value(true)),
        )
        .subcommand(SubCommand::with_name("logout").about("End the session"))
        .subcommand(SubCommand::with_name("lists").about("Show todo-lists"))
        .subcommand(
            SubCommand::with_name("create")
                .about("Create a todo-list")
                .arg(Arg::with_name("title").required(true)),
        )
        .subcommand(
            SubCommand::with_name("rename")
                .about("Rename a todo-list")
                .arg(Arg::with_name("id").required(true))
                .arg(Arg::with_name("title").required(true)),
        )
        .subcommand(
            SubCommand::with_name("delete")
                .about("Delete a todo-list")
                .arg(Arg::with_name("id").required(true)),
        )
        .subcommand(
            SubCommand::with_name("config")
                .about("Update the configuration file")
                .arg(Arg::with_name("base-url").long("base-url").takes_value(true))
                .arg(Arg::with_name("api-key").long("api-key").takes_value(true))
                .arg(Arg::with_name("log-level").long("log-level").takes_value(true)),
        )
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();
    let mut config = Config::load(matches.value_of("config"))?;

    let level = if matches.is_present("verbose") {
        LevelFilter::Debug
    } else {
        config.level_filter()?
    };
    logger::init(level)?;

    if let ("config", Some(args)) = matches.subcommand() {
        return configure(&mut config, args);
    }

    let mut app = App::new(&config)?;
    // Start-up session check; a rejection here only means "not logged in".
    let _ = app.dispatch(Event::CheckSession).await;

    let outcome = match matches.subcommand() {
        ("status", _) => Ok(()),
        ("login", Some(args)) => {
            let credentials = LoginArgs {
                email: value(args, "email")?,
                password: value(args, "password")?,
                remember_me: args.is_present("remember-me"),
                captcha: args.value_of("captcha").map(String::from),
            };
            app.dispatch(Event::Login(credentials)).await
        }
        ("logout", _) => app.dispatch(Event::Logout).await,
        ("lists", _) => app.dispatch(Event::FetchTodolists).await,
        ("create", Some(args)) => {
            app.dispatch(Event::AddTodolist {
                title: value(args, "title")?,
            })
            .await
        }
        ("rename", Some(args)) => {
            app.dispatch(Event::UpdateTodolistTitle {
                id: value(args, "id")?,
                title: value(args, "title")?,
            })
            .await
        }
        ("delete", Some(args)) => {
            let id = value(args, "id")?;
            fetch_then(&mut app, Event::RemoveTodolist { id }).await
        }
        (other, _) => return Err(anyhow!("Unknown command '{}'", other)),
    };

    let state = app.state();
    let state = state.lock().await;
    print_state(&state);
    if outcome.is_err() {
        let message = state.select_app_error().unwrap_or("Request failed");
        return Err(anyhow!("{}", message));
    }
    Ok(())
}

/// Load the current lists first so per-record status applies to a known record.
///
async fn fetch_then(app: &mut App, event: Event) -> Outcome {
    app.dispatch(Event::FetchTodolists).await?;
    app.dispatch(event).await
}

fn value(args: &ArgMatches, name: &str) -> Result<String> {
    args.value_of(name)
        .map(String::from)
        .ok_or_else(|| anyhow!("Missing argument '{}'", name))
}

fn configure(config: &mut Config, args: &ArgMatches) -> Result<()> {
    if let Some(base_url) = args.value_of("base-url") {
        config.base_url = base_url.to_string();
    }
    if let Some(api_key) = args.value_of("api-key") {
        config.api_key = Some(api_key.to_string());
    }
    if let Some(log_level) = args.value_of("log-level") {
        config.log_level = log_level.to_string();
        config.level_filter()?;
    }
    config.save()?;
    println!("Configuration saved to {}", config.dir_path().display());
    Ok(())
}

fn print_state(state: &State) {
    println!(
        "logged in: {}  initialized: {}  status: {}",
        state.select_is_logged_in(),
        state.select_is_initialized(),
        state.select_app_status()
    );
    for todolist in state.select_todolists() {
        println!(
            "{}  {}  ({})",
            todolist.id, todolist.title, todolist.entity_status
        );
    }
    for field_error in state.select_field_errors() {
        eprintln!("{}: {}", field_error.field, field_error.error);
    }
}
