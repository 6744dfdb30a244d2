//! Prompt templates.
//!
//! A template turns a [`GenerationRequest`] into the instruction sent to the
//! model. Templates are pure: the same request always yields the same prompt.

use crate::GenerationRequest;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

const SLANG_AUDIENCES: &[&str] = &[
    "Para meus pais (bem simples e didático)",
    "Para um colega de trabalho (tom casual, mas profissional)",
    "Para um amigo (descontraído)",
    "Técnica (etimologia e contexto cultural)",
];

const BRAND_STYLES: &[&str] = &[
    "Moderno e minimalista",
    "Divertido e jovem",
    "Elegante e sofisticado",
    "Rústico e artesanal",
];

/// Built-in prompt templates.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PromptTemplate {
    /// Explains a slang term for a chosen audience
    #[strum(to_string = "slang", serialize = "slang_decoder")]
    #[serde(alias = "slang")]
    SlangDecoder,
    /// Names a product and drafts its visual identity
    #[strum(to_string = "brand", serialize = "brand_identity")]
    #[serde(alias = "brand")]
    BrandIdentity,
}

impl PromptTemplate {
    /// Title shown to users.
    pub fn title(&self) -> &'static str {
        match self {
            PromptTemplate::SlangDecoder => "Decodificador de Gírias",
            PromptTemplate::BrandIdentity => "Gerador de Marcas",
        }
    }

    /// The fixed set of styles this template accepts.
    pub fn styles(&self) -> &'static [&'static str] {
        match self {
            PromptTemplate::SlangDecoder => SLANG_AUDIENCES,
            PromptTemplate::BrandIdentity => BRAND_STYLES,
        }
    }

    /// Whether the template produces an image after the text.
    pub fn includes_image(&self) -> bool {
        matches!(self, PromptTemplate::BrandIdentity)
    }

    /// Returns true if `style` is one of [`Self::styles`].
    pub fn accepts_style(&self, style: &str) -> bool {
        self.styles().contains(&style)
    }

    /// Resolves a style by exact name or by 1-based position.
    ///
    /// # Examples
    ///
    /// ```
    /// use muse_core::PromptTemplate;
    ///
    /// let t = PromptTemplate::BrandIdentity;
    /// assert_eq!(t.resolve_style("2"), Some("Divertido e jovem"));
    /// assert_eq!(t.resolve_style("Divertido e jovem"), Some("Divertido e jovem"));
    /// assert_eq!(t.resolve_style("9"), None);
    /// ```
    pub fn resolve_style(&self, input: &str) -> Option<&'static str> {
        let styles = self.styles();
        if let Some(found) = styles.iter().find(|s| **s == input) {
            return Some(*found);
        }
        input
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| styles.get(i).copied())
    }

    /// Builds the text-stage instruction.
    pub fn build_prompt(&self, request: &GenerationRequest) -> String {
        let subject = neutralize(request.subject());
        let style = request.style();
        match self {
            PromptTemplate::SlangDecoder => format!(
                r#"Você é o "Decodificador de Gírias", um especialista em cultura da internet e linguística moderna.
Sua tarefa é explicar uma gíria de forma clara, concisa e adaptada ao público-alvo.

**Gíria a ser explicada:** "{subject}"

**Público-alvo da explicação:** "{style}"

**Formato da Resposta (Obrigatório):**
1. **Definição:** Comece com uma definição direta (O que significa?).
2. **Origem/Contexto:** (Se souber) Explique brevemente de onde veio (jogo, rede social, etc.).
3. **Exemplo de Uso:** Dê 1 ou 2 frases de exemplo.

Adapte o tom da explicação para o público-alvo solicitado."#
            ),
            PromptTemplate::BrandIdentity => format!(
                r#"Você é um especialista em branding e marketing.
Crie uma identidade de marca para o produto descrito abaixo.

**Produto:** "{subject}"

**Estilo da marca:** "{style}"

**Formato da Resposta (Obrigatório):**
Nome: um nome curto e memorável.
Slogan: uma frase de efeito de no máximo dez palavras.
Descrição: um parágrafo apresentando o produto.
Prompt de imagem: uma descrição visual do logotipo, em uma linha.

Mantenha todas as seções coerentes com o estilo pedido."#
            ),
        }
    }

    /// Builds the image-stage instruction from the same request.
    pub fn build_image_prompt(&self, request: &GenerationRequest) -> String {
        let subject = neutralize(request.subject());
        let style = request.style();
        match self {
            PromptTemplate::SlangDecoder => format!(
                r#"Crie uma ilustração simples e bem-humorada que represente a gíria "{subject}", adequada ao público "{style}". Não inclua texto na imagem."#
            ),
            PromptTemplate::BrandIdentity => format!(
                r#"Crie um logotipo para o produto "{subject}" no estilo "{style}". Fundo liso, composição centralizada, sem texto além do nome da marca."#
            ),
        }
    }
}

/// Keeps the subject from breaking the quoted slot it is placed in.
fn neutralize(subject: &str) -> Cow<'_, str> {
    if !subject.contains(['"', '\n', '\r']) {
        return Cow::Borrowed(subject);
    }
    let single_line = subject
        .split(['\r', '\n'])
        .filter(|line| !line.trim().is_empty())
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join(" ");
    Cow::Owned(single_line.replace('"', "'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn prompt_embeds_subject_and_style_verbatim() {
        for template in PromptTemplate::iter() {
            for style in template.styles() {
                let request = GenerationRequest::new("meter o shape", *style);
                let prompt = template.build_prompt(&request);
                assert!(prompt.contains("meter o shape"));
                assert!(prompt.contains(style));
            }
        }
    }

    #[test]
    fn prompt_is_deterministic() {
        let request = GenerationRequest::new("Café gelado em lata", "Divertido e jovem");
        let t = PromptTemplate::BrandIdentity;
        assert_eq!(t.build_prompt(&request), t.build_prompt(&request));
        assert_eq!(t.build_image_prompt(&request), t.build_image_prompt(&request));
    }

    #[test]
    fn brand_prompt_requests_fixed_sections() {
        let request = GenerationRequest::new("Tênis", "Moderno e minimalista");
        let prompt = PromptTemplate::BrandIdentity.build_prompt(&request);
        for section in ["Nome:", "Slogan:", "Descrição:", "Prompt de imagem:"] {
            assert!(prompt.contains(section), "missing {}", section);
        }
    }

    #[test]
    fn slang_prompt_requests_fixed_sections() {
        let request = GenerationRequest::new("rizz", SLANG_AUDIENCES[0]);
        let prompt = PromptTemplate::SlangDecoder.build_prompt(&request);
        for section in ["Definição", "Origem/Contexto", "Exemplo de Uso"] {
            assert!(prompt.contains(section), "missing {}", section);
        }
    }

    #[test]
    fn quotes_and_newlines_are_neutralized() {
        let request = GenerationRequest::new("say \"hi\"\nnow", BRAND_STYLES[0]);
        let prompt = PromptTemplate::BrandIdentity.build_prompt(&request);
        assert!(prompt.contains(r#""say 'hi' now""#));
    }

    #[test]
    fn bare_carriage_returns_are_neutralized() {
        let request = GenerationRequest::new("a\rb\"c\r\nd", BRAND_STYLES[0]);
        let prompt = PromptTemplate::BrandIdentity.build_prompt(&request);
        assert!(prompt.contains(r#""a b'c d""#));
        assert!(!prompt.contains('\r'));
    }

    #[test]
    fn only_slang_is_text_only() {
        assert!(!PromptTemplate::SlangDecoder.includes_image());
        assert!(PromptTemplate::BrandIdentity.includes_image());
    }

    #[test]
    fn template_parses_short_names() {
        assert_eq!("slang".parse::<PromptTemplate>().ok(), Some(PromptTemplate::SlangDecoder));
        assert_eq!("brand".parse::<PromptTemplate>().ok(), Some(PromptTemplate::BrandIdentity));
        assert!("poem".parse::<PromptTemplate>().is_err());
    }

    #[test]
    fn resolve_style_rejects_zero() {
        assert_eq!(PromptTemplate::SlangDecoder.resolve_style("0"), None);
        assert_eq!(
            PromptTemplate::SlangDecoder.resolve_style("4"),
            Some("Técnica (etimologia e contexto cultural)")
        );
    }
}
