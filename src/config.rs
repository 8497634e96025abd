//! Configuração carregada a partir de `credito.toml`.
//!
//! A struct [`CreditoConfig`] contém todos os parâmetros configuráveis.
//! Valores não presentes no arquivo usam defaults sensíveis.
//! Variáveis de ambiente têm precedência sobre o arquivo.

use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::scpc::Contract;

/// Configuração de nível superior carregada de `credito.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreditoConfig {
    /// Operador autenticado que executa as ações administrativas.
    #[serde(default)]
    pub operator: Option<String>,

    /// Diretório dos arquivos JSON de dados.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// URL base usada nos links públicos de formulário.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    #[serde(default)]
    pub scpc: ScpcSettings,

    #[serde(default)]
    pub email: EmailSettings,
}

/// Acesso à API do SCPC.
#[derive(Debug, Clone, Deserialize)]
pub struct ScpcSettings {
    #[serde(default = "default_scpc_url")]
    pub url: String,
    #[serde(default)]
    pub usuario: String,
    #[serde(default)]
    pub senha: String,
    #[serde(default)]
    pub regional: u32,
    #[serde(default)]
    pub codigo: u32,
    #[serde(default)]
    pub senha_sistema: String,
}

/// Relay de email e destinatário dos avisos administrativos.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmailSettings {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub admin_email: Option<String>,
}

// Diretório padrão dos dados: "dados".
fn default_data_dir() -> PathBuf {
    PathBuf::from("dados")
}

// URL padrão do front-end local.
fn default_public_base_url() -> String {
    "http://localhost:5173".to_string()
}

fn default_scpc_url() -> String {
    crate::scpc::client::API_URL.to_string()
}

impl Default for ScpcSettings {
    fn default() -> Self {
        Self {
            url: default_scpc_url(),
            usuario: String::new(),
            senha: String::new(),
            regional: 0,
            codigo: 0,
            senha_sistema: String::new(),
        }
    }
}

impl ScpcSettings {
    pub fn contract(&self) -> Contract {
        Contract {
            regional: self.regional,
            codigo: self.codigo,
            senha_sistema: self.senha_sistema.clone(),
        }
    }
}

impl Default for CreditoConfig {
    fn default() -> Self {
        Self {
            operator: None,
            data_dir: default_data_dir(),
            public_base_url: default_public_base_url(),
            scpc: ScpcSettings::default(),
            email: EmailSettings::default(),
        }
    }
}

impl CreditoConfig {
    /// Carrega `credito.toml` do diretório atual e aplica o ambiente.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(Path::new("credito.toml"))?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Usa valores padrão se o arquivo não existir.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str::<CreditoConfig>(&contents)?)
    }

    /// Sobrescreve campos com as variáveis definidas e não vazias.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = var("CREDITO_OPERADOR") {
            self.operator = Some(v);
        }
        if let Some(v) = var("CREDITO_DATA_DIR") {
            self.data_dir = PathBuf::from(v);
        }
        if let Some(v) = var("SCPC_URL") {
            self.scpc.url = v;
        }
        if let Some(v) = var("SCPC_USER") {
            self.scpc.usuario = v;
        }
        if let Some(v) = var("SCPC_PASSWORD") {
            self.scpc.senha = v;
        }
        if let Some(v) = var("SCPC_REGIONAL")
            && let Ok(n) = v.trim().parse()
        {
            self.scpc.regional = n;
        }
        if let Some(v) = var("SCPC_CODIGO")
            && let Ok(n) = v.trim().parse()
        {
            self.scpc.codigo = n;
        }
        if let Some(v) = var("SCPC_SENHA_SISTEMA") {
            self.scpc.senha_sistema = v;
        }
        if let Some(v) = var("EMAIL_API_URL") {
            self.email.api_url = Some(v);
        }
        if let Some(v) = var("ADMIN_EMAIL") {
            self.email.admin_email = Some(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config_values() {
        let config = CreditoConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("dados"));
        assert_eq!(config.public_base_url, "http://localhost:5173");
        assert_eq!(config.scpc.url, "https://api.scpc.inf.br/consulta");
        assert!(config.operator.is_none());
        assert!(config.email.api_url.is_none());
    }

    #[test]
    fn deserialize_partial_toml() {
        let toml_str = r#"
            operator = "admin@imobiliaria.com"

            [scpc]
            usuario = "user"
            regional = 11
        "#;
        let config: CreditoConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.operator.as_deref(), Some("admin@imobiliaria.com"));
        assert_eq!(config.scpc.usuario, "user");
        assert_eq!(config.scpc.regional, 11);
        assert_eq!(config.scpc.codigo, 0);
        assert_eq!(config.scpc.url, "https://api.scpc.inf.br/consulta");
        assert_eq!(config.data_dir, PathBuf::from("dados"));
    }

    #[test]
    fn env_overrides_file() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("SCPC_USER", "env-user"),
            ("SCPC_REGIONAL", "7"),
            ("SCPC_CODIGO", "not-a-number"),
            ("CREDITO_OPERADOR", "ops"),
            ("ADMIN_EMAIL", ""),
        ]);
        let mut config = CreditoConfig::default();
        config.scpc.codigo = 99;
        config.apply_env(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.scpc.usuario, "env-user");
        assert_eq!(config.scpc.regional, 7);
        assert_eq!(config.scpc.codigo, 99);
        assert_eq!(config.operator.as_deref(), Some("ops"));
        assert!(config.email.admin_email.is_none());
    }

    #[test]
    fn load_from_missing_file_falls_back_to_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = CreditoConfig::load_from(&tmp.path().join("credito.toml")).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("dados"));
    }

    #[test]
    fn load_from_reads_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("credito.toml");
        std::fs::write(&path, "data_dir = \"/var/lib/credito\"\n").unwrap();
        let config = CreditoConfig::load_from(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/credito"));
    }

    #[test]
    fn contract_from_settings() {
        let settings = ScpcSettings {
            regional: 3,
            codigo: 44,
            senha_sistema: "x".into(),
            ..ScpcSettings::default()
        };
        let contract = settings.contract();
        assert_eq!(contract.regional, 3);
        assert_eq!(contract.codigo, 44);
    }
}
