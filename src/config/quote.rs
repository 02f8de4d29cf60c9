//! Quote command arguments

use clap::{Args, ValueEnum};

use crate::{
    form::{FormData, FormDataError},
    options::Category,
};

/// How the quote is printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Terminal table
    Table,

    /// HTML fragment with the breakdown and total elements
    Html,
}

/// Form field values for one quote.
#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// Size (servings)
    #[arg(long, default_value = "10")]
    pub size: String,

    /// Sponge flavour
    #[arg(long, default_value = "vainilla")]
    pub bizcocho: String,

    /// Filling; repeat for up to two fillings, in selection order
    #[arg(long)]
    pub relleno: Vec<String>,

    /// Frosting
    #[arg(long, default_value = "merengue")]
    pub cobertura: String,

    /// Extra; repeat for several
    #[arg(long)]
    pub extra: Vec<String>,

    /// Encoded form data (`size=20&bizcocho=chocolate&...`), replacing the field flags
    #[arg(long, conflicts_with_all = ["size", "bizcocho", "relleno", "cobertura", "extra"])]
    pub form: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

impl QuoteArgs {
    /// Form data described by the arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if `--form` is malformed.
    pub fn form_data(&self) -> Result<FormData, FormDataError> {
        if let Some(encoded) = &self.form {
            return FormData::parse(encoded);
        }

        let mut data = FormData::new();

        data.append(Category::Size.field_name(), self.size.as_str())
            .append(Category::Sponge.field_name(), self.bizcocho.as_str());

        for relleno in &self.relleno {
            data.append(Category::Filling.field_name(), relleno.as_str());
        }

        data.append(Category::Frosting.field_name(), self.cobertura.as_str());

        for extra in &self.extra {
            data.append(Category::Extra.field_name(), extra.as_str());
        }

        Ok(data)
    }
}
