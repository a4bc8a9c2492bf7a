use crm_client::app::App;
use crm_client::config::AppConfig;
use crm_client::error::CrmError;
use crm_client::models::{DashboardStats, StatusFilter};

use color_eyre::eyre::eyre;
use color_eyre::Result;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const USAGE: &str = "\
usage: crm <command>

commands:
  login <email> <password>
  register <name> <email> <password>
  logout
  whoami
  customers [page] [search]
  leads [status]
  dashboard
  theme [toggle]";

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    if std::env::args().any(|arg| arg == "--version") {
        println!("crm {}", VERSION);
        return Ok(());
    }

    color_eyre::install()?;
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(args))
}

async fn run(args: Vec<String>) -> Result<()> {
    let app = App::bootstrap(AppConfig::from_env()).await;
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["login", email, password] => {
            let user = app.login(email, password).await.map_err(report)?;
            println!("Signed in as {} <{}>", user.name, user.email);
        }
        ["register", name, email, password] => {
            let user = app
                .register(name, email, password, password)
                .await
                .map_err(report)?;
            println!("Account created for {} <{}>", user.name, user.email);
        }
        ["logout"] => {
            app.logout().await;
            println!("Signed out");
        }
        ["whoami"] => match app.auth.current_user() {
            Some(user) => println!("{} <{}> ({:?})", user.name, user.email, user.role),
            None => println!("Not signed in"),
        },
        ["customers", rest @ ..] => {
            require_session(&app)?;
            let page = match rest.first() {
                Some(raw) => raw.parse::<u32>().map_err(|_| eyre!("invalid page: {}", raw))?,
                None => 1,
            };
            let search = rest.get(1).copied().unwrap_or_default();
            app.customers.set_search_query(search);
            app.customers
                .fetch_customers(page, search)
                .await
                .map_err(|e| report(e.into()))?;

            let state = app.customers.snapshot();
            for customer in &state.customers {
                println!(
                    "{:<8} {:<24} {:<28} {}",
                    customer.id, customer.name, customer.email, customer.company
                );
            }
            if state.has_more {
                println!("-- more: crm customers {} {}", page + 1, search);
            }
        }
        ["leads", rest @ ..] => {
            require_session(&app)?;
            let filter = match rest.first() {
                Some(raw) => raw.parse::<StatusFilter>().map_err(|e| eyre!(e))?,
                None => StatusFilter::All,
            };
            app.leads
                .fetch_leads(None, filter)
                .await
                .map_err(|e| report(e.into()))?;
            for lead in app.leads.snapshot().leads {
                println!(
                    "{:<8} {:<10} {:>12.2}  {} (customer {})",
                    lead.id,
                    lead.status.as_str(),
                    lead.value,
                    lead.title,
                    lead.customer_id
                );
            }
        }
        ["dashboard"] => {
            require_session(&app)?;
            let stats = app.load_dashboard().await.map_err(report)?;
            print_dashboard(&stats);
        }
        ["theme"] => println!("{}", app.theme.mode()),
        ["theme", "toggle"] => println!("{}", app.theme.toggle().await),
        _ => {
            eprintln!("{}", USAGE);
            return Err(eyre!("unrecognized command"));
        }
    }

    Ok(())
}

fn require_session(app: &App) -> Result<()> {
    if app.auth.is_authenticated() {
        Ok(())
    } else {
        Err(report(crm_client::error::AuthError::NotAuthenticated.into()))
    }
}

fn report(err: CrmError) -> color_eyre::Report {
    eyre!("[{}] {}", err.error_code(), err.user_message())
}

fn print_dashboard(stats: &DashboardStats) {
    println!("Customers:       {}", stats.total_customers);
    println!("Leads:           {}", stats.total_leads);
    println!("Pipeline value:  {:.2}", stats.total_value);
    println!("Conversion rate: {:.1}%", stats.conversion_rate() * 100.0);
    for (status, count) in stats.leads_by_status.series() {
        println!(
            "  {:<10} {:>4}  {:>12.2}",
            status.as_str(),
            count,
            stats.value_by_status.get(status)
        );
    }
}
