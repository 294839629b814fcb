use super::App;
use super::prompt::confirm;
use crate::services::DevContainerRequest;
use anyhow::Result;
use clap::Args;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone, Default)]
pub struct CreateOptions {
    /// Container de origem
    pub source: String,

    /// Nome do dev container (padrão: <origem><name_suffix>)
    pub dev_name: Option<String>,

    /// Diretório do host montado no dev container (dev.swap_target)
    pub swap_dir: Option<PathBuf>,

    /// Não expõe a porta nem instala o debugger
    #[arg(long)]
    pub no_debugger: bool,

    /// Comando executado via `sh -c` depois que o container sobe
    #[arg(long, conflicts_with = "no_inject")]
    pub inject: Option<String>,

    /// Não executa o comando de inicialização
    #[arg(long)]
    pub no_inject: bool,

    /// Recria sem perguntar se o dev container já existir
    #[arg(short, long)]
    pub yes: bool,

    /// Só imprime o comando run, sem executar nada
    #[arg(long)]
    pub dry_run: bool,
}

impl CreateOptions {
    pub fn to_request(&self, app: &App) -> DevContainerRequest {
        let settings = app.settings();

        let inject = if self.no_inject {
            None
        } else {
            self.inject.clone().or_else(|| settings.inject.clone())
        };

        DevContainerRequest {
            source: self.source.clone(),
            dev_name: self
                .dev_name
                .clone()
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| format!("{}{}", self.source, settings.name_suffix)),
            swap_dir: self.swap_dir.clone(),
            debugger: settings.debugger_enabled && !self.no_debugger,
            inject,
        }
    }
}

pub fn run<R: BufRead, W: Write>(
    app: &App,
    options: &CreateOptions,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let request = options.to_request(app);
    let binary = &app.settings().binary;

    if options.dry_run {
        let plan = app.orchestrator.plan(&request)?;
        writeln!(output, "{binary} run -d {}", plan.rendered())?;
        return Ok(());
    }

    let orchestrator = &app.orchestrator;

    if orchestrator.dev_container_exists(&request.dev_name)? {
        writeln!(output, "\nDev container '{}' já existe.", request.dev_name)?;

        let recreate =
            options.yes || confirm(input, output, "Deseja recriá-lo?")?;
        if !recreate {
            writeln!(output, "Saindo sem alterações.")?;
            return Ok(());
        }

        orchestrator.replace_existing(&request.dev_name)?;
    }

    orchestrator.create(&request)?;
    info!("create '{}' -> '{}' concluído", request.source, request.dev_name);

    writeln!(output, "\n✅ Dev container '{}' pronto!", request.dev_name)?;
    writeln!(output, "\nAgora você pode:")?;
    writeln!(
        output,
        "  - Entrar nele: {binary} exec -it {} /bin/sh",
        request.dev_name
    )?;
    if request.debugger {
        writeln!(
            output,
            "  - Depurar com delve na porta {}",
            app.settings().debugger_port
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::Settings;
    use crate::test_support::MockRuntime;
    use std::sync::Arc;
    use std::time::Duration;

    const SOURCE: &str = r#"[{"Name": "/web", "Config": {"Image": "nginx:1.27"}}]"#;

    fn app() -> (App, Arc<MockRuntime>) {
        let mock = Arc::new(MockRuntime::new());
        mock.add_inspect("web", SOURCE);
        let settings = Settings {
            ready_timeout: Duration::from_millis(50),
            ready_interval: Duration::from_millis(5),
            ..Settings::default()
        };
        (App::with_runtime(mock.clone(), settings), mock)
    }

    fn options() -> CreateOptions {
        CreateOptions {
            source: "web".to_string(),
            no_debugger: true,
            no_inject: true,
            ..Default::default()
        }
    }

    fn run_with_input(app: &App, options: &CreateOptions, input: &str) -> String {
        let mut out = Vec::new();
        run(app, options, &mut input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn request_defaults_from_settings() {
        let (app, _mock) = app();
        let request = CreateOptions {
            source: "web".to_string(),
            ..Default::default()
        }
        .to_request(&app);

        assert_eq!(request.dev_name, "web-dev");
        assert!(request.debugger);
        assert_eq!(request.inject, Settings::default().inject);
        assert_eq!(request.swap_dir, None);
    }

    #[test]
    fn request_honours_flags() {
        let (app, _mock) = app();
        let request = CreateOptions {
            source: "web".to_string(),
            dev_name: Some("sandbox".to_string()),
            swap_dir: Some(PathBuf::from("/tmp/swap")),
            no_debugger: true,
            inject: Some("make dev".to_string()),
            ..Default::default()
        }
        .to_request(&app);

        assert_eq!(request.dev_name, "sandbox");
        assert!(!request.debugger);
        assert_eq!(request.inject.as_deref(), Some("make dev"));
        assert_eq!(request.swap_dir, Some(PathBuf::from("/tmp/swap")));

        let request = options().to_request(&app);
        assert_eq!(request.inject, None);
    }

    #[test]
    fn dry_run_prints_command_only() {
        let (app, mock) = app();
        let opts = CreateOptions {
            dry_run: true,
            ..options()
        };

        let out = run_with_input(&app, &opts, "");
        assert_eq!(
            shell_words::split(out.trim()).unwrap(),
            vec!["docker", "run", "-d", "--name", "web-dev", "nginx:1.27"]
        );
        assert!(!mock.get_commands().iter().any(|c| c.starts_with("run:")));
    }

    #[test]
    fn creates_new_container() {
        let (app, mock) = app();

        let out = run_with_input(&app, &options(), "");

        assert!(out.contains("Dev container 'web-dev' pronto"));
        assert!(mock.is_running_now("web-dev"));
        assert_eq!(
            mock.run_args("web-dev").unwrap(),
            vec!["--name", "web-dev", "nginx:1.27"]
        );
    }

    #[test]
    fn declining_prompt_leaves_existing_container() {
        let (app, mock) = app();
        mock.add_container("web-dev", true);

        let out = run_with_input(&app, &options(), "n\n");

        assert!(out.contains("Saindo sem alterações"));
        let commands = mock.get_commands();
        assert!(!commands.contains(&"remove:web-dev".to_string()));
        assert!(!commands.contains(&"run:web-dev".to_string()));
    }

    #[test]
    fn accepting_prompt_recreates_container() {
        let (app, mock) = app();
        mock.add_container("web-dev", true);

        run_with_input(&app, &options(), "Y\n");

        let commands = mock.get_commands();
        let stop = commands.iter().position(|c| c == "stop:web-dev").unwrap();
        let remove = commands.iter().position(|c| c == "remove:web-dev").unwrap();
        let create = commands.iter().position(|c| c == "run:web-dev").unwrap();
        assert!(stop < remove && remove < create);
    }

    #[test]
    fn yes_flag_skips_prompt() {
        let (app, mock) = app();
        mock.add_container("web-dev", false);

        let out = run_with_input(&app, &CreateOptions { yes: true, ..options() }, "");

        assert!(!out.contains("(y/n)"));
        assert!(mock.get_commands().contains(&"run:web-dev".to_string()));
    }
}
