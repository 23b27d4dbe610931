use serde::{Deserialize, Serialize};

use crate::command::{Operation, Request};
use crate::error::DispatchError;

/// User-facing language. Every visible string goes through here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "es")]
    Spanish,
}

impl std::str::FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "es" | "spanish" | "español" => Ok(Language::Spanish),
            other => anyhow::bail!("unsupported language: {}", other),
        }
    }
}

impl Language {
    pub fn window_title(&self) -> &'static str {
        match self {
            Language::English => "Package manager",
            Language::Spanish => "Gestor de paquetes",
        }
    }

    pub fn input_label(&self) -> &'static str {
        match self {
            Language::English => "Packages (space separated) or search term:",
            Language::Spanish => "Paquetes (separados por espacio) o término de búsqueda:",
        }
    }

    pub fn input_placeholder(&self) -> &'static str {
        match self {
            Language::English => "e.g. 'powertoys' or 'microsoft visualstudio'",
            Language::Spanish => "Ej: 'powertoys' o 'microsoft visualstudio'",
        }
    }

    pub fn output_label(&self) -> &'static str {
        match self {
            Language::English => "Command output:",
            Language::Spanish => "Salida del comando:",
        }
    }

    pub fn button(&self, operation: Operation) -> &'static str {
        match (self, operation) {
            (Language::English, Operation::Install) => "Install",
            (Language::English, Operation::Uninstall) => "Uninstall",
            (Language::English, Operation::Search) => "Search",
            (Language::English, Operation::List) => "List Installed",
            (Language::English, Operation::Upgrade) => "Upgrade All",
            (Language::Spanish, Operation::Install) => "Instalar",
            (Language::Spanish, Operation::Uninstall) => "Desinstalar",
            (Language::Spanish, Operation::Search) => "Buscar",
            (Language::Spanish, Operation::List) => "Listar Instalados",
            (Language::Spanish, Operation::Upgrade) => "Actualizar Todo",
        }
    }

    pub fn ok(&self) -> &'static str {
        "OK"
    }

    pub fn theme_toggle(&self, dark: bool) -> &'static str {
        match (self, dark) {
            (Language::English, true) => "Light",
            (Language::English, false) => "Dark",
            (Language::Spanish, true) => "Claro",
            (Language::Spanish, false) => "Oscuro",
        }
    }

    /// Status line shown while `request` runs.
    pub fn starting(&self, request: &Request) -> String {
        let subject = &request.subject;
        match (self, request.operation) {
            (Language::English, Operation::Install) => format!("Starting installation of: {}...", subject),
            (Language::English, Operation::Uninstall) => format!("Starting uninstallation of: {}...", subject),
            (Language::English, Operation::Search) => format!("Searching: '{}'...", subject),
            (Language::English, Operation::List) => "Fetching the list of installed packages...".to_string(),
            (Language::English, Operation::Upgrade) => "Looking for and installing system updates...".to_string(),
            (Language::Spanish, Operation::Install) => format!("Iniciando instalación de: {}...", subject),
            (Language::Spanish, Operation::Uninstall) => format!("Iniciando desinstalación de: {}...", subject),
            (Language::Spanish, Operation::Search) => format!("Buscando: '{}'...", subject),
            (Language::Spanish, Operation::List) => "Obteniendo lista de paquetes instalados...".to_string(),
            (Language::Spanish, Operation::Upgrade) => "Buscando e instalando actualizaciones del sistema...".to_string(),
        }
    }

    pub fn closing(&self) -> &'static str {
        match self {
            Language::English => "Closing... waiting for the worker thread.",
            Language::Spanish => "Cerrando... esperando al hilo de trabajo.",
        }
    }

    /// Alert title and body for a refused action.
    pub fn dispatch_error(&self, error: &DispatchError) -> (String, String) {
        match error {
            DispatchError::EmptyInput(operation) => {
                let title = match self {
                    Language::English => "Empty input",
                    Language::Spanish => "Entrada vacía",
                };
                let body = match (self, operation) {
                    (Language::English, Operation::Search) => "Please enter a search term.",
                    (Language::English, Operation::Uninstall) => "Please enter one or more package IDs to uninstall.",
                    (Language::English, _) => "Please enter one or more package IDs to install.",
                    (Language::Spanish, Operation::Search) => "Por favor, ingresa un término de búsqueda.",
                    (Language::Spanish, Operation::Uninstall) => "Por favor, ingresa uno o más IDs de paquete para desinstalar.",
                    (Language::Spanish, _) => "Por favor, ingresa uno o más IDs de paquete para instalar.",
                };
                (title.to_string(), body.to_string())
            }
            DispatchError::Busy => match self {
                Language::English => ("Busy".to_string(), "Another command is still running. Wait for it to finish.".to_string()),
                Language::Spanish => ("Ocupado".to_string(), "Otro comando sigue en ejecución. Espera a que termine.".to_string()),
            },
            DispatchError::WorkerStopped => match self {
                Language::English => ("Worker stopped".to_string(), "The background worker is no longer running.".to_string()),
                Language::Spanish => ("Hilo detenido".to_string(), "El hilo de trabajo ya no está en ejecución.".to_string()),
            },
        }
    }

    pub fn failure_prefix(&self) -> &'static str {
        match self {
            Language::English => "OPERATION FAILED:",
            Language::Spanish => "OPERACIÓN FALLIDA:",
        }
    }

    pub fn failure_title(&self, tool: &str) -> String {
        match self {
            Language::English => format!("{} error", tool),
            Language::Spanish => format!("Error de {}", tool),
        }
    }

    pub fn command_failed(&self, command: &str, output: &str) -> String {
        match self {
            Language::English => format!("Error running: {}\n{}", command, output),
            Language::Spanish => format!("Error al ejecutar: {}\n{}", command, output),
        }
    }

    pub fn tool_not_found(&self, tool: &str) -> String {
        match self {
            Language::English => format!(
                "Error: command '{}' not found.\nIs '{}' installed and on the system PATH?",
                tool, tool
            ),
            Language::Spanish => format!(
                "Error: Comando '{}' no encontrado.\n¿Está '{}' instalado y en el PATH del sistema?",
                tool, tool
            ),
        }
    }

    pub fn unexpected(&self, detail: &str) -> String {
        match self {
            Language::English => format!("Unexpected error: {}", detail),
            Language::Spanish => format!("Error inesperado: {}", detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command;

    #[test]
    fn parses_language_codes() {
        assert_eq!("es".parse::<Language>().unwrap(), Language::Spanish);
        assert_eq!("EN".parse::<Language>().unwrap(), Language::English);
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn starting_mentions_subject() {
        let request = command::install("winget", "Git.Git 7zip.7zip").unwrap();
        assert_eq!(
            Language::English.starting(&request),
            "Starting installation of: Git.Git 7zip.7zip..."
        );
        assert_eq!(
            Language::Spanish.starting(&request),
            "Iniciando instalación de: Git.Git 7zip.7zip..."
        );
    }

    #[test]
    fn tool_not_found_mentions_path() {
        let message = Language::English.tool_not_found("winget");
        assert!(message.contains("'winget'"));
        assert!(message.contains("PATH"));
    }
}
