use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fatec_finder::client::ApiClient;
use fatec_finder::config;
use fatec_finder::session::Session;
use fatec_finder::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fatec_finder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration / Carregar configuração
    let app_config = config::load_config().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!(
        "fatec-finder v{} (built {})",
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_TIME")
    );
    tracing::info!("Upstream API: {}", app_config.api_base());
    config::init_config(app_config.clone());

    let client = ApiClient::new(&app_config)?;
    let session = Session::new(Arc::new(AppState::new()), client);
    session.bootstrap().await?;

    println!("Pesquisar cidade ou FATEC (:N abre o resultado N, :q sai)");
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();

        if input == ":q" {
            break;
        }

        if let Some(arg) = input.strip_prefix(':') {
            match arg.parse::<usize>() {
                Ok(n) if n >= 1 => open_result(&session, n - 1).await,
                _ => println!("Comando inválido: {}", input),
            }
            continue;
        }

        let results = session.update_search(input);
        if results.is_empty() {
            println!("Nenhum resultado.");
            continue;
        }
        for (i, result) in results.iter().enumerate() {
            println!(
                "{:>3}. {} — {}{}",
                i + 1,
                result.name,
                result.address,
                result
                    .city_name
                    .as_deref()
                    .map(|c| format!(" ({})", c))
                    .unwrap_or_default()
            );
        }
    }

    Ok(())
}

/// Open the Nth entry of the last result list and print the detail panel.
async fn open_result(session: &Session, index: usize) {
    let state = session.state().clone();
    let Some(result) = state.search_results().get(index).cloned() else {
        println!("Sem resultado nessa posição.");
        return;
    };

    session.open_result(result.id).await;

    let Some(institution) = state.selected_institution() else {
        return;
    };

    println!("\n=== {} ===", institution.name);
    for paragraph in &institution.description {
        println!("{}\n", paragraph);
    }
    println!("Endereço: {}", institution.address);
    println!("Telefone: {}", institution.phone_number);

    let photos = state.institution_photos(institution.id);
    if !photos.is_empty() {
        println!("\nFotos:");
        for photo in &photos {
            println!("  {}", photo.url);
        }
    }

    let courses = state.institution_courses(institution.id);
    if courses.is_empty() {
        // Fetch may have failed; the view just stays empty
        println!("\nNenhum curso carregado.");
    } else {
        println!("\nCursos disponíveis:");
        for course in &courses {
            println!("  - {}", course.title);
            for offering in state.course_offerings_of(course.id) {
                match &offering.period {
                    Some(period) => println!("      {} ({})", offering.shift, period),
                    None => println!("      {}", offering.shift),
                }
            }
        }
    }
    println!();
}
