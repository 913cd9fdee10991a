use anyhow::{Context, Result};
use ictinv_core::{AppConfig, OutputFormat, PrototypeKind, Registry, Resource};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

const MENU: &str = "\n=== ICT RESOURCE MANAGEMENT ===
1. Add resource
2. List resources
3. Update resource
4. Search resource
5. Exit
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuOption {
    Add,
    List,
    Update,
    Search,
    Exit,
}

impl MenuOption {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Add),
            "2" => Some(Self::List),
            "3" => Some(Self::Update),
            "4" => Some(Self::Search),
            "5" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Numbered-menu frontend over a [`Registry`].
pub struct Console<R, W> {
    registry: Registry,
    config: AppConfig,
    input: R,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(registry: Registry, config: AppConfig, input: R, output: W) -> Self {
        Self {
            registry,
            config,
            input,
            output,
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Drive the menu until the user exits or input runs out.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.write(MENU).await?;
            let Some(choice) = self.prompt("Select an option: ").await? else {
                break;
            };

            match MenuOption::parse(&choice) {
                Some(MenuOption::Add) => self.add_resource().await?,
                Some(MenuOption::List) => self.list_resources().await?,
                Some(MenuOption::Update) => self.update_resource().await?,
                Some(MenuOption::Search) => self.search_resource().await?,
                Some(MenuOption::Exit) => break,
                None => {
                    debug!("ignoring menu input {:?}", choice);
                    self.say("Invalid option").await?;
                }
            }
        }

        info!("console closed");
        self.output.flush().await.context("failed to flush output")
    }

    async fn add_resource(&mut self) -> Result<()> {
        self.say("\n=== ADD RESOURCE ===").await?;
        self.say("Select the base resource type:").await?;
        self.say("1. Computer").await?;
        self.say("2. Projector").await?;
        self.say("3. Other").await?;

        let Some(choice) = self.prompt("").await? else {
            return Ok(());
        };
        let seed = PrototypeKind::from_choice(&choice).map(PrototypeKind::instantiate);

        let Some(code) = self.prompt("Enter the code: ").await? else {
            return Ok(());
        };
        let Some(name) = self.prompt("Enter the name: ").await? else {
            return Ok(());
        };

        let (resource_type, status) = match &seed {
            Some(seed) => (seed.resource_type().to_string(), seed.status().to_string()),
            None => (
                self.config.default_type.clone(),
                self.config.default_status.clone(),
            ),
        };

        let added = Resource::builder()
            .code(code)
            .name(name)
            .resource_type(resource_type)
            .status(status)
            .build()
            .map_err(anyhow::Error::from)
            .and_then(|resource| self.registry.add(resource).map_err(anyhow::Error::from));

        match added {
            Ok(()) => self.say("Resource added successfully").await,
            Err(err) => self.say(&format!("Error: {err}")).await,
        }
    }

    async fn list_resources(&mut self) -> Result<()> {
        self.say("\n=== RESOURCE LIST ===").await?;
        let resources = self.registry.list();
        if resources.is_empty() {
            return self.say("No resources registered").await;
        }

        for resource in &resources {
            let line = self.render(resource)?;
            self.say(&line).await?;
        }
        Ok(())
    }

    async fn update_resource(&mut self) -> Result<()> {
        self.say("\n=== UPDATE RESOURCE ===").await?;
        let Some(code) = self
            .prompt("Enter the code of the resource to update: ")
            .await?
        else {
            return Ok(());
        };

        let Some(existing) = self.registry.search(&code) else {
            return self.say("Resource not found").await;
        };

        let Some(name) = self
            .prompt("Enter the new name (Enter to keep current): ")
            .await?
        else {
            return Ok(());
        };
        let Some(status) = self
            .prompt("Enter the new status (Enter to keep current): ")
            .await?
        else {
            return Ok(());
        };

        let mut builder = existing.to_builder();
        if !name.is_empty() {
            builder = builder.name(name);
        }
        if !status.is_empty() {
            builder = builder.status(status);
        }

        let updated = builder
            .build()
            .map_err(anyhow::Error::from)
            .and_then(|resource| {
                self.registry
                    .update(&code, resource)
                    .map_err(anyhow::Error::from)
            });

        match updated {
            Ok(true) => self.say("Resource updated successfully").await,
            Ok(false) => self.say("Resource not found").await,
            Err(err) => self.say(&format!("Error: {err}")).await,
        }
    }

    async fn search_resource(&mut self) -> Result<()> {
        self.say("\n=== SEARCH RESOURCE ===").await?;
        let Some(code) = self.prompt("Enter the resource code: ").await? else {
            return Ok(());
        };

        match self.registry.search(&code) {
            Some(resource) => {
                self.say("Resource found:").await?;
                let line = self.render(&resource)?;
                self.say(&line).await
            }
            None => self.say("Resource not found").await,
        }
    }

    fn render(&self, resource: &Resource) -> Result<String> {
        match self.config.output {
            OutputFormat::Text => Ok(resource.to_string()),
            OutputFormat::Json => {
                serde_json::to_string(resource).context("failed to serialize resource")
            }
        }
    }

    /// Print `label`, then read one line without its terminator.
    /// `None` signals end of input.
    async fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        self.write(label).await?;
        self.output.flush().await.context("failed to flush output")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .await
            .context("failed to read input")?;
        if read == 0 {
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(|c: char| c == '\n' || c == '\r');
        Ok(Some(trimmed.to_string()))
    }

    async fn say(&mut self, line: &str) -> Result<()> {
        self.write(line).await?;
        self.write("\n").await
    }

    async fn write(&mut self, text: &str) -> Result<()> {
        self.output
            .write_all(text.as_bytes())
            .await
            .context("failed to write output")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn run_script(registry: &Registry, config: AppConfig, script: &str) -> Result<String> {
        let mut console = Console::new(registry.clone(), config, script.as_bytes(), Vec::new());
        console.run().await?;
        Ok(String::from_utf8(console.into_output())?)
    }

    #[tokio::test]
    async fn adds_resource_from_prototype() -> Result<()> {
        let registry = Registry::new();
        let output = run_script(
            &registry,
            AppConfig::default(),
            "1\n1\nPC-010\nThinkPad X1\n5\n",
        )
        .await?;

        assert!(output.contains("Resource added successfully"));
        let added = registry.search("PC-010").expect("resource added");
        assert_eq!(added.name(), "ThinkPad X1");
        assert_eq!(added.resource_type(), "computer");
        assert_eq!(added.status(), "available");
        Ok(())
    }

    #[tokio::test]
    async fn other_base_uses_configured_defaults() -> Result<()> {
        let registry = Registry::new();
        let config = AppConfig {
            default_type: "peripheral".to_string(),
            default_status: "in stock".to_string(),
            ..AppConfig::default()
        };
        run_script(&registry, config, "1\n3\nR001\nKeyboard\n5\n").await?;

        let added = registry.search("R001").expect("resource added");
        assert_eq!(added.resource_type(), "peripheral");
        assert_eq!(added.status(), "in stock");
        Ok(())
    }

    #[tokio::test]
    async fn reports_validation_and_duplicate_errors() -> Result<()> {
        let registry = Registry::new();
        let output = run_script(
            &registry,
            AppConfig::default(),
            "1\n2\n   \nProjector\n1\n2\nPY-100\nProjector\n1\n2\nPY-100\nAgain\n5\n",
        )
        .await?;

        assert!(output.contains("Error: code must not be empty"));
        assert!(output.contains("Error: a resource with code PY-100 already exists"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.list()[0].name(), "Projector");
        Ok(())
    }

    #[tokio::test]
    async fn lists_empty_and_populated_registry() -> Result<()> {
        let registry = Registry::new();
        let output = run_script(&registry, AppConfig::default(), "2\n5\n").await?;
        assert!(output.contains("No resources registered"));

        registry.add(
            Resource::builder()
                .code("R001")
                .name("Switch")
                .resource_type("network")
                .build()?,
        )?;
        let output = run_script(&registry, AppConfig::default(), "2\n5\n").await?;
        assert!(output
            .contains("Resource(code=R001, name=Switch, type=network, status=available)"));
        Ok(())
    }

    #[tokio::test]
    async fn update_keeps_blank_fields() -> Result<()> {
        let registry = Registry::new();
        registry.add(
            Resource::builder()
                .code("PC-001")
                .name("Laptop")
                .resource_type("computer")
                .status("available")
                .build()?,
        )?;

        let output =
            run_script(&registry, AppConfig::default(), "3\nPC-001\n\nin use\n5\n").await?;
        assert!(output.contains("Resource updated successfully"));

        let updated = registry.search("PC-001").expect("resource kept");
        assert_eq!(updated.name(), "Laptop");
        assert_eq!(updated.status(), "in use");
        assert_eq!(updated.resource_type(), "computer");
        Ok(())
    }

    #[tokio::test]
    async fn update_of_unknown_code_reports_not_found() -> Result<()> {
        let registry = Registry::new();
        let output = run_script(&registry, AppConfig::default(), "3\nR404\n5\n").await?;
        assert!(output.contains("Resource not found"));
        assert!(registry.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn search_renders_json_when_configured() -> Result<()> {
        let registry = Registry::new();
        registry.add(Resource::builder().code("R001").name("Router").build()?)?;
        let config = AppConfig {
            output: OutputFormat::Json,
            ..AppConfig::default()
        };

        let output = run_script(&registry, config, "4\nR001\n4\nR003\n5\n").await?;
        assert!(output.contains("Resource found:"));
        assert!(output.contains(
            r#"{"code":"R001","name":"Router","type":"other","status":"available"}"#
        ));
        assert!(output.contains("Resource not found"));
        Ok(())
    }

    #[tokio::test]
    async fn invalid_choice_and_end_of_input_are_handled() -> Result<()> {
        let registry = Registry::new();
        let output = run_script(&registry, AppConfig::default(), "9\nabc\n").await?;
        assert_eq!(output.matches("Invalid option").count(), 2);
        assert_eq!(output.matches("=== ICT RESOURCE MANAGEMENT ===").count(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn end_of_input_mid_prompt_stops_cleanly() -> Result<()> {
        let registry = Registry::new();
        run_script(&registry, AppConfig::default(), "1\n1\nPC-002").await?;
        assert!(registry.is_empty());
        Ok(())
    }
}
