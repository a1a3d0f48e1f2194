// Company record model + record source seam
// The source is a trait so the static sample data can be swapped for a
// real registry lookup without touching the rendering pipeline.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::mask::format_cnpj;

/// Economic-activity entry (CNAE). The first entry of a record is the
/// principal activity, the rest are secondary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cnae {
    pub codigo: String,
    pub descricao: String,
}

/// Ownership/management entry (sócio or administrador).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Socio {
    pub nome: String,
    /// Role description ("Sócio-Administrador", "Sócio", ...)
    pub descricao: String,
    pub identificador: u8,
    /// Masked tax id, e.g. "***123456**"
    pub cnpj_cpf: String,
    /// Date of entry into the ownership structure (dd/mm/yyyy)
    pub data_entrada: String,
    pub nome_representante: Option<String>,
    pub faixa_etaria: Option<String>,
}

/// One company registration record.
///
/// Scalar fields mirror the registry payload; optional scalars render
/// as a placeholder when absent. Lives for a single query cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub cnpj: String,
    pub situacao_cadastral: String,
    pub data_situacao_cadastral: String,
    pub motivo_situacao_cadastral: String,
    pub razao_social: String,
    pub nome_fantasia: Option<String>,
    pub data_inicio_atividades: String,
    pub matriz: String,
    pub natureza_juridica: String,
    pub capital_social: f64,
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub logradouro: String,
    pub numero: String,
    pub complemento: Option<String>,
    pub bairro: String,
    pub municipio: String,
    pub uf: String,
    pub cep: String,
    pub data_situacao_especial: Option<String>,
    pub situacao_especial: Option<String>,
    /// Raw registry flag: "S"/"Sim" means enrolled
    pub opcao_simples: String,
    pub opcao_mei: String,
    pub cnaes: Vec<Cnae>,
    pub socios: Vec<Socio>,
}

/// Record source boundary.
///
/// `Ok(None)` is the explicit not-found signal; `Err` is a transport
/// failure. The static implementation below never errs, a network
/// implementation would.
pub trait RecordSource {
    fn fetch(&self, cnpj: &str) -> Result<Option<CompanyRecord>>;
}

/// Static record source - fixed sample data for every query.
///
/// The returned record carries the queried identifier (masked) so the
/// output reflects what the user typed.
pub struct StaticRecordSource;

impl StaticRecordSource {
    pub fn new() -> Self {
        StaticRecordSource
    }

    fn sample_record() -> CompanyRecord {
        CompanyRecord {
            cnpj: "00.000.000/0001-91".to_string(),
            situacao_cadastral: "Ativa".to_string(),
            data_situacao_cadastral: "03/11/2005".to_string(),
            motivo_situacao_cadastral: "SEM MOTIVO".to_string(),
            razao_social: "EMPRESA DE EXEMPLO LTDA".to_string(),
            nome_fantasia: Some("NOME FANTASIA DE EXEMPLO".to_string()),
            data_inicio_atividades: "01/08/1966".to_string(),
            matriz: "Sim".to_string(),
            natureza_juridica: "Sociedade Empresária Limitada (2062)".to_string(),
            capital_social: 100000.00,
            email: Some("contato@empresaexemplo.com.br".to_string()),
            telefone: Some("(11) 5555-4444".to_string()),
            logradouro: "RUA DO EXEMPLO".to_string(),
            numero: "123".to_string(),
            complemento: Some("SALA 456".to_string()),
            bairro: "CENTRO".to_string(),
            municipio: "SAO PAULO".to_string(),
            uf: "SP".to_string(),
            cep: "01000-000".to_string(),
            data_situacao_especial: None,
            situacao_especial: None,
            opcao_simples: "N".to_string(),
            opcao_mei: "N".to_string(),
            cnaes: vec![
                Cnae {
                    codigo: "6201501".to_string(),
                    descricao: "Desenvolvimento de programas de computador sob encomenda"
                        .to_string(),
                },
                Cnae {
                    codigo: "6204000".to_string(),
                    descricao: "Consultoria em tecnologia da informação".to_string(),
                },
            ],
            socios: vec![
                Socio {
                    nome: "Fulano de Tal".to_string(),
                    descricao: "Sócio-Administrador".to_string(),
                    identificador: 2,
                    cnpj_cpf: "***123456**".to_string(),
                    data_entrada: "01/08/1966".to_string(),
                    nome_representante: None,
                    faixa_etaria: Some("41-50 anos".to_string()),
                },
                Socio {
                    nome: "Ciclana da Silva".to_string(),
                    descricao: "Sócio".to_string(),
                    identificador: 2,
                    cnpj_cpf: "***654321**".to_string(),
                    data_entrada: "10/05/2010".to_string(),
                    nome_representante: None,
                    faixa_etaria: Some("51-60 anos".to_string()),
                },
            ],
        }
    }
}

impl RecordSource for StaticRecordSource {
    fn fetch(&self, cnpj: &str) -> Result<Option<CompanyRecord>> {
        let mut record = Self::sample_record();
        record.cnpj = format_cnpj(cnpj);
        Ok(Some(record))
    }
}

impl Default for StaticRecordSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_source_returns_record() {
        let source = StaticRecordSource::new();
        let record = source.fetch("11222333000181").unwrap().unwrap();
        assert_eq!(record.razao_social, "EMPRESA DE EXEMPLO LTDA");
        assert_eq!(record.cnaes.len(), 2);
        assert_eq!(record.socios.len(), 2);
    }

    #[test]
    fn test_static_source_echoes_queried_cnpj() {
        let source = StaticRecordSource::new();
        let record = source.fetch("11222333000181").unwrap().unwrap();
        assert_eq!(record.cnpj, "11.222.333/0001-81");
    }

    #[test]
    fn test_record_roundtrips_through_json() {
        let record = StaticRecordSource::sample_record();
        let json = serde_json::to_string(&record).unwrap();
        let back: CompanyRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.capital_social, 100000.00);
        assert_eq!(back.socios[0].nome, "Fulano de Tal");
        assert!(back.situacao_especial.is_none());
    }

    #[test]
    fn test_first_cnae_is_principal() {
        let record = StaticRecordSource::sample_record();
        assert_eq!(record.cnaes[0].codigo, "6201501");
    }
}
