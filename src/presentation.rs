use crate::form::CepForm;
use crate::models::Address;
use serde::Serialize;

pub const TITLE: &str = "Consulta de CEP";
pub const SUBTITLE: &str = "Digite um CEP para buscar o endereço";
pub const INPUT_PLACEHOLDER: &str = "00000-000";
pub const LOADING_TEXT: &str = "Buscando informações...";
pub const RESULT_TITLE: &str = "Informações do Endereço";
/// Shown in place of any address field the service left out.
pub const MISSING_FIELD: &str = "Não informado";

/// One labeled line of the result panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoRow {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultPanel {
    pub title: &'static str,
    pub rows: Vec<InfoRow>,
}

impl ResultPanel {
    pub fn from_address(address: &Address) -> Self {
        let fields = [
            ("CEP", &address.cep),
            ("Logradouro", &address.logradouro),
            ("Complemento", &address.complemento),
            ("Bairro", &address.bairro),
            ("Cidade", &address.localidade),
            ("Estado", &address.uf),
            ("IBGE", &address.ibge),
            ("DDD", &address.ddd),
        ];

        let rows = fields
            .into_iter()
            .map(|(label, value)| InfoRow {
                label,
                value: value.clone().unwrap_or_else(|| MISSING_FIELD.to_string()),
            })
            .collect();

        Self {
            title: RESULT_TITLE,
            rows,
        }
    }
}

/// Everything a client needs to draw the CEP screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenView {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub input: String,
    pub placeholder: &'static str,
    pub loading: bool,
    pub loading_text: Option<&'static str>,
    pub error: Option<String>,
    pub result: Option<ResultPanel>,
}

impl ScreenView {
    pub fn from_form(form: &CepForm) -> Self {
        let loading = form.is_loading();
        Self {
            title: TITLE,
            subtitle: SUBTITLE,
            input: form.input().to_string(),
            placeholder: INPUT_PLACEHOLDER,
            loading,
            loading_text: loading.then_some(LOADING_TEXT),
            error: (!form.error().is_empty()).then(|| form.error().to_string()),
            // Hidden while a lookup is running
            result: form
                .result()
                .filter(|_| !loading)
                .map(ResultPanel::from_address),
        }
    }
}
