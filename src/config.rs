// src/config.rs

use std::{env, net::SocketAddr, str::FromStr, sync::Arc, time::Duration};

use anyhow::{Context, anyhow};
use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions, PgSslMode},
};

use crate::{
    db::{
        IdentityRepository, IdentityStore, InMemoryStore, RentalRepository, RentalStore,
        ReportRepository, ReportStore,
    },
    services::{auth::IdentityService, rental_service::RentalService, report_service::ReportService},
};

// Configuração lida do ambiente (PG* no mesmo formato do libpq). Cada chave tem um padrão.
#[derive(Clone)]
pub struct Config {
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub db_ssl_mode: PgSslMode,
    pub listen_addr: SocketAddr,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub statement_timeout: Duration,
    pub run_migrations: bool,
}

// Sem a senha: o Debug vai para o log na inicialização.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("db_host", &self.db_host)
            .field("db_port", &self.db_port)
            .field("db_user", &self.db_user)
            .field("db_name", &self.db_name)
            .field("db_ssl_mode", &self.db_ssl_mode)
            .field("listen_addr", &self.listen_addr)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .field("statement_timeout", &self.statement_timeout)
            .field("run_migrations", &self.run_migrations)
            .finish_non_exhaustive()
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Separado do `from_env` para os testes não mexerem no ambiente do processo.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let db_port = get("PGPORT", "5432");
        let db_port: u16 = db_port
            .parse()
            .with_context(|| format!("PGPORT inválido: {db_port:?}"))?;

        let ssl_mode = get("PGSSLMODE", "disable");
        let db_ssl_mode = PgSslMode::from_str(&ssl_mode)
            .with_context(|| format!("PGSSLMODE inválido: {ssl_mode:?}"))?;

        let listen_addr = parse_listen_addr(&get("ADDR", ":8080"))?;

        let max_connections = get("DB_MAX_CONNECTIONS", "5");
        let max_connections: u32 = max_connections
            .parse()
            .with_context(|| format!("DB_MAX_CONNECTIONS inválido: {max_connections:?}"))?;
        if max_connections == 0 {
            return Err(anyhow!("DB_MAX_CONNECTIONS deve ser maior que zero"));
        }

        let acquire_timeout = parse_secs("DB_ACQUIRE_TIMEOUT_SECS", &get("DB_ACQUIRE_TIMEOUT_SECS", "3"))?;
        let statement_timeout =
            parse_secs("DB_STATEMENT_TIMEOUT_SECS", &get("DB_STATEMENT_TIMEOUT_SECS", "5"))?;

        let run_migrations = get("RUN_MIGRATIONS", "true");
        let run_migrations = match run_migrations.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => true,
            "false" | "0" | "no" => false,
            other => return Err(anyhow!("RUN_MIGRATIONS inválido: {other:?}")),
        };

        Ok(Self {
            db_host: get("PGHOST", "db"),
            db_port,
            db_user: get("PGUSER", "postgres"),
            db_password: get("PGPASSWORD", "postgres"),
            db_name: get("PGDATABASE", "dvdrental"),
            db_ssl_mode,
            listen_addr,
            max_connections,
            acquire_timeout,
            statement_timeout,
            run_migrations,
        })
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .password(&self.db_password)
            .database(&self.db_name)
            .ssl_mode(self.db_ssl_mode)
            // Nenhuma consulta fica pendurada: o Postgres cancela e o sqlx devolve erro.
            .options([(
                "statement_timeout",
                format!("{}ms", self.statement_timeout.as_millis()),
            )])
    }

    pub async fn connect(&self) -> anyhow::Result<PgPool> {
        let pool = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
            .connect_with(self.connect_options())
            .await
            .with_context(|| {
                format!(
                    "falha ao conectar em {}:{}/{}",
                    self.db_host, self.db_port, self.db_name
                )
            })?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
        Ok(pool)
    }
}

// ":8080" (estilo Go) significa todas as interfaces.
fn parse_listen_addr(raw: &str) -> anyhow::Result<SocketAddr> {
    let candidate = match raw.strip_prefix(':') {
        Some(port) => format!("0.0.0.0:{port}"),
        None => raw.to_string(),
    };
    candidate
        .parse()
        .with_context(|| format!("ADDR inválido: {raw:?}"))
}

fn parse_secs(key: &str, raw: &str) -> anyhow::Result<Duration> {
    let secs: u64 = raw
        .parse()
        .with_context(|| format!("{key} inválido: {raw:?}"))?;
    if secs == 0 {
        return Err(anyhow!("{key} deve ser maior que zero"));
    }
    Ok(Duration::from_secs(secs))
}

// O estado compartilhado que será acessível em toda a aplicação.
// Os serviços recebem as stores prontas; nada de conexão global.
#[derive(Clone)]
pub struct AppState {
    pub identity_service: IdentityService,
    pub rental_service: RentalService,
    pub report_service: ReportService,
}

impl AppState {
    pub fn new(
        identity_store: Arc<dyn IdentityStore>,
        rental_store: Arc<dyn RentalStore>,
        report_store: Arc<dyn ReportStore>,
    ) -> Self {
        Self {
            identity_service: IdentityService::new(identity_store),
            rental_service: RentalService::new(rental_store),
            report_service: ReportService::new(report_store),
        }
    }

    // --- Monta o gráfico de dependências sobre o Postgres ---
    pub fn from_pool(pool: PgPool) -> Self {
        Self::new(
            Arc::new(IdentityRepository::new(pool.clone())),
            Arc::new(RentalRepository::new(pool.clone())),
            Arc::new(ReportRepository::new(pool)),
        )
    }

    pub fn in_memory(store: InMemoryStore) -> Self {
        Self::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store),
        )
    }
}
