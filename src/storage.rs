//! Persistência local em arquivos JSON.
//!
//! Cada coleção (requisições, contratos, imóveis, formulários) é um array
//! JSON em `data_dir`. Escritas são atômicas: o conteúdo vai para um arquivo
//! temporário no mesmo diretório que depois é renomeado sobre o original.
//!
//! O store assume um único processo escrevendo por vez: duas execuções
//! simultâneas que alteram a mesma coleção podem perder uma das alterações.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::contracts::ActiveContract;
use crate::error::{CreditoError, Result};
use crate::forms::{FormRecord, Property};
use crate::workflow::CreditRequest;

const REQUESTS_FILE: &str = "requisicoes.json";
const CONTRACTS_FILE: &str = "contratos.json";
const PROPERTIES_FILE: &str = "imoveis.json";
const FORMS_FILE: &str = "formularios.json";

pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn read<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        let path = self.dir.join(file);
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write<T: Serialize>(&self, file: &str, items: &[T]) -> Result<()> {
        let path = self.dir.join(file);
        let content = serde_json::to_string_pretty(items)?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| e.error)?;
        debug!(path = %path.display(), count = items.len(), "coleção gravada");
        Ok(())
    }

    // --- requisições ---

    pub fn insert_request(&self, request: &CreditRequest) -> Result<()> {
        let mut all: Vec<CreditRequest> = self.read(REQUESTS_FILE)?;
        all.push(request.clone());
        self.write(REQUESTS_FILE, &all)
    }

    /// Todas as requisições, da análise mais recente para a mais antiga.
    pub fn list_requests(&self) -> Result<Vec<CreditRequest>> {
        let mut all: Vec<CreditRequest> = self.read(REQUESTS_FILE)?;
        all.sort_by(|a, b| b.data_analise.cmp(&a.data_analise));
        Ok(all)
    }

    pub fn get_request(&self, id: &str) -> Result<CreditRequest> {
        self.read::<CreditRequest>(REQUESTS_FILE)?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| CreditoError::RequestNotFound(id.to_string()))
    }

    /// Substitui a requisição com o mesmo id.
    pub fn update_request(&self, request: &CreditRequest) -> Result<()> {
        let mut all: Vec<CreditRequest> = self.read(REQUESTS_FILE)?;
        let slot = all
            .iter_mut()
            .find(|r| r.id == request.id)
            .ok_or_else(|| CreditoError::RequestNotFound(request.id.clone()))?;
        *slot = request.clone();
        self.write(REQUESTS_FILE, &all)
    }

    // --- contratos ---

    /// Grava o contrato, substituindo um anterior com o mesmo id.
    pub fn save_contract(&self, contract: &ActiveContract) -> Result<()> {
        let mut all: Vec<ActiveContract> = self.read(CONTRACTS_FILE)?;
        match all.iter_mut().find(|c| c.id == contract.id) {
            Some(slot) => *slot = contract.clone(),
            None => all.push(contract.clone()),
        }
        self.write(CONTRACTS_FILE, &all)
    }

    /// Contratos ativos, do mais recente para o mais antigo.
    pub fn list_contracts(&self) -> Result<Vec<ActiveContract>> {
        let mut all: Vec<ActiveContract> = self.read(CONTRACTS_FILE)?;
        all.sort_by(|a, b| b.data_assinatura.cmp(&a.data_assinatura));
        Ok(all)
    }

    // --- imóveis e formulários ---

    pub fn insert_property(&self, property: &Property) -> Result<()> {
        let mut all: Vec<Property> = self.read(PROPERTIES_FILE)?;
        all.push(property.clone());
        self.write(PROPERTIES_FILE, &all)
    }

    pub fn list_properties(&self) -> Result<Vec<Property>> {
        let mut all: Vec<Property> = self.read(PROPERTIES_FILE)?;
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    pub fn get_property(&self, id: &str) -> Result<Property> {
        self.read::<Property>(PROPERTIES_FILE)?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CreditoError::PropertyNotFound(id.to_string()))
    }

    pub fn insert_form(&self, form: &FormRecord) -> Result<()> {
        let mut all: Vec<FormRecord> = self.read(FORMS_FILE)?;
        all.push(form.clone());
        self.write(FORMS_FILE, &all)
    }

    /// Formulários de um imóvel, do mais recente para o mais antigo.
    pub fn list_forms(&self, imovel_id: &str) -> Result<Vec<FormRecord>> {
        let mut forms: Vec<FormRecord> = self
            .read::<FormRecord>(FORMS_FILE)?
            .into_iter()
            .filter(|f| f.imovel_id == imovel_id)
            .collect();
        forms.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(forms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{Centavos, Cpf};
    use crate::workflow::{LeaseValues, Status};
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    fn request(nome: &str, aprovado: bool) -> CreditRequest {
        CreditRequest::new(
            nome.into(),
            Cpf::parse("12345678909").unwrap(),
            LeaseValues {
                aluguel: Centavos(100_000),
                condominio: Centavos(20_000),
                seguro: Centavos(1_000),
            },
            aprovado,
        )
        .unwrap()
    }

    #[test]
    fn empty_store_lists_nothing() {
        let tmp = TempDir::new().unwrap();
        let store = Store::open(tmp.path()).unwrap();
        assert!(store.list_requests().unwrap().is_empty());
        assert!(store.list_contracts().unwrap().is_empty());
        assert!(store.list_forms("x").unwrap().is_empty());
    }

    #[test]
    fn open_creates_directory() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("dados").join("credito");
        Store::open(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn requests_round_trip_newest_first() {
        let tmp = TempDir::new().unwrap();
        let store = Store::open(tmp.path()).unwrap();

        let mut older = request("Antigo", true);
        older.data_analise = Utc::now() - Duration::days(2);
        let newer = request("Novo", false);

        store.insert_request(&older).unwrap();
        store.insert_request(&newer).unwrap();

        let listed = store.list_requests().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].nome, "Novo");
        assert_eq!(listed[1].nome, "Antigo");
    }

    #[test]
    fn update_replaces_existing_request() {
        let tmp = TempDir::new().unwrap();
        let store = Store::open(tmp.path()).unwrap();
        let mut req = request("Ana", true);
        store.insert_request(&req).unwrap();

        req.status = Status::EmAndamento;
        store.update_request(&req).unwrap();

        assert_eq!(store.get_request(&req.id).unwrap().status, Status::EmAndamento);
        assert_eq!(store.list_requests().unwrap().len(), 1);
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let tmp = TempDir::new().unwrap();
        let store = Store::open(tmp.path()).unwrap();
        let req = request("Ana", true);

        assert!(matches!(
            store.get_request("nope"),
            Err(CreditoError::RequestNotFound(_))
        ));
        assert!(matches!(
            store.update_request(&req),
            Err(CreditoError::RequestNotFound(_))
        ));
        assert!(matches!(
            store.get_property("nope"),
            Err(CreditoError::PropertyNotFound(_))
        ));
    }

    #[test]
    fn write_leaves_no_temp_file() {
        let tmp = TempDir::new().unwrap();
        let store = Store::open(tmp.path()).unwrap();
        store.insert_request(&request("Ana", true)).unwrap();
        store.insert_request(&request("Bia", false)).unwrap();

        let names: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["requisicoes.json"]);
    }

    #[test]
    fn save_contract_replaces_same_id() {
        let tmp = TempDir::new().unwrap();
        let store = Store::open(tmp.path()).unwrap();
        let mut contract = ActiveContract {
            id: "r1".into(),
            cpf: Cpf::parse("12345678909").unwrap(),
            valor_assegurado: Centavos(100_000),
            data_assinatura: Utc::now(),
        };
        store.save_contract(&contract).unwrap();
        contract.valor_assegurado = Centavos(200_000);
        store.save_contract(&contract).unwrap();

        assert_eq!(store.list_contracts().unwrap(), vec![contract]);
    }

    #[test]
    fn corrupted_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("requisicoes.json"), "{not json").unwrap();
        let store = Store::open(tmp.path()).unwrap();
        assert!(matches!(store.list_requests(), Err(CreditoError::Json(_))));
    }
}
