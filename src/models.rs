use serde::{Deserialize, Deserializer, Serialize};

/// Raw ViaCEP payload for `GET /ws/{cep}/json/`.
///
/// A known CEP returns the address fields; an unknown one returns only
/// `{"erro": true}`. Older deployments send the marker as the string `"true"`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViaCepResponse {
    #[serde(default, deserialize_with = "deserialize_not_found_marker")]
    pub erro: bool,
    pub cep: Option<String>,
    pub logradouro: Option<String>,
    pub complemento: Option<String>,
    pub bairro: Option<String>,
    pub localidade: Option<String>,
    pub uf: Option<String>,
    pub ibge: Option<String>,
    pub ddd: Option<String>,
}

fn deserialize_not_found_marker<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    })
}

/// Address returned by a successful lookup.
///
/// Fields the service omitted or sent empty are `None`; how a missing field is
/// shown is up to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub cep: Option<String>,
    pub logradouro: Option<String>,
    pub complemento: Option<String>,
    pub bairro: Option<String>,
    pub localidade: Option<String>,
    pub uf: Option<String>,
    pub ibge: Option<String>,
    pub ddd: Option<String>,
}

impl From<ViaCepResponse> for Address {
    fn from(resp: ViaCepResponse) -> Self {
        Self {
            cep: non_empty(resp.cep),
            logradouro: non_empty(resp.logradouro),
            complemento: non_empty(resp.complemento),
            bairro: non_empty(resp.bairro),
            localidade: non_empty(resp.localidade),
            uf: non_empty(resp.uf),
            ibge: non_empty(resp.ibge),
            ddd: non_empty(resp.ddd),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Deserialize)]
pub struct InputRequest {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_found_payload() {
        let payload = json!({
            "cep": "01310-930",
            "logradouro": "Avenida Paulista",
            "complemento": "2100",
            "unidade": "",
            "bairro": "Bela Vista",
            "localidade": "São Paulo",
            "uf": "SP",
            "estado": "São Paulo",
            "regiao": "Sudeste",
            "ibge": "3550308",
            "gia": "1004",
            "ddd": "11",
            "siafi": "7107"
        });

        let resp: ViaCepResponse = serde_json::from_value(payload).unwrap();
        assert!(!resp.erro);

        let address = Address::from(resp);
        assert_eq!(address.cep.as_deref(), Some("01310-930"));
        assert_eq!(address.localidade.as_deref(), Some("São Paulo"));
        assert_eq!(address.ddd.as_deref(), Some("11"));
    }

    #[test]
    fn test_not_found_marker_variants() {
        let as_bool: ViaCepResponse = serde_json::from_value(json!({"erro": true})).unwrap();
        assert!(as_bool.erro);

        let as_string: ViaCepResponse = serde_json::from_value(json!({"erro": "true"})).unwrap();
        assert!(as_string.erro);

        let false_marker: ViaCepResponse =
            serde_json::from_value(json!({"erro": false, "cep": "70040-010"})).unwrap();
        assert!(!false_marker.erro);
    }

    #[test]
    fn test_empty_fields_become_none() {
        let resp: ViaCepResponse = serde_json::from_value(json!({
            "cep": "70040-010",
            "logradouro": "",
            "complemento": "   ",
            "uf": "DF"
        }))
        .unwrap();

        let address = Address::from(resp);
        assert_eq!(address.logradouro, None);
        assert_eq!(address.complemento, None);
        assert_eq!(address.bairro, None);
        assert_eq!(address.uf.as_deref(), Some("DF"));
    }
}
