//! Interactive session
//!
//! Reads one command per line, keeps the product list and the in-memory
//! session token alive between commands, and writes rendered screens back.
//! While the add-product form is open, `title`, `price`, `brand` and `sku`
//! fill its inputs and `save` or `cancel` closes it.

use crate::auth::{GuardError, LoginError, LoginFlow, LoginForm, Navigation, Route, RouteGuard};
use crate::products::{AddProductField, ProductListController};
use crate::render::{render_field_errors, render_products};
use catalog_client::{AuthService, CatalogSource};
use catalog_core::SortField;
use std::str::FromStr;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error};

/// Prompt printed before each command
pub const PROMPT: &str = "catalog> ";

/// Command reference printed by `help`
pub const HELP: &str = "\
Commands:
  login <username> <password> [--remember]
  logout
  open <path>          /login or /products
  search [term]        empty term clears the search
  sort <field>         title, brand, sku, rating or price; repeat to flip
  page <n> | next | prev
  refresh              reload the current page from the server
  show                 redraw the current page
  add                  open the add-product form
    title|price|brand|sku <value>, then save or cancel
  help
  quit
";

/// A command line that could not be understood
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    /// First word is not a command
    #[error("Unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    /// A required argument is missing
    #[error("Usage: {0}")]
    Usage(&'static str),

    /// An argument has the wrong form
    #[error("{0}")]
    Invalid(String),
}

/// One parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Log in and open the product list
    Login(LoginForm),
    /// Forget the token
    Logout,
    /// Navigate to a path
    Open(String),
    /// Set the search term
    Search(String),
    /// Toggle sorting on a column
    Sort(SortField),
    /// Go to a page
    Page(u32),
    /// Next page
    Next,
    /// Previous page
    Prev,
    /// Reload from the server
    Refresh,
    /// Redraw
    Show,
    /// Open the add-product form
    Add,
    /// Fill one add-product input
    Field(AddProductField, String),
    /// Submit the add-product form
    Save,
    /// Close the add-product form
    Cancel,
    /// Print the command reference
    Help,
    /// Leave the shell
    Quit,
}

impl FromStr for ShellCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let field = |field| {
            if rest.is_empty() {
                Err(CommandError::Usage("title|price|brand|sku <value>"))
            } else {
                Ok(Self::Field(field, rest.to_string()))
            }
        };

        match word.to_ascii_lowercase().as_str() {
            "login" => {
                let mut args = rest.split_whitespace();
                let usage = CommandError::Usage("login <username> <password> [--remember]");
                let username = args.next().ok_or_else(|| usage.clone())?;
                let password = args.next().ok_or(usage)?;
                let remember = args.any(|a| a == "--remember" || a == "-r");
                Ok(Self::Login(LoginForm::new(username, password, remember)))
            }
            "logout" => Ok(Self::Logout),
            "open" if rest.is_empty() => Err(CommandError::Usage("open <path>")),
            "open" => Ok(Self::Open(rest.to_string())),
            "search" => Ok(Self::Search(rest.to_string())),
            "sort" if rest.is_empty() => Err(CommandError::Usage("sort <field>")),
            "sort" => SortField::from_str(rest)
                .map(Self::Sort)
                .map_err(|e| CommandError::Invalid(e.to_string())),
            "page" => rest
                .parse()
                .map(Self::Page)
                .map_err(|_| CommandError::Usage("page <n>")),
            "next" => Ok(Self::Next),
            "prev" => Ok(Self::Prev),
            "refresh" => Ok(Self::Refresh),
            "show" => Ok(Self::Show),
            "add" => Ok(Self::Add),
            "title" => field(AddProductField::Title),
            "price" => field(AddProductField::Price),
            "brand" => field(AddProductField::Brand),
            "sku" => field(AddProductField::Sku),
            "save" => Ok(Self::Save),
            "cancel" => Ok(Self::Cancel),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(word.to_string())),
        }
    }
}

/// What the shell does after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this and read the next command
    Text(String),
    /// Leave the loop
    Quit,
}

/// Interactive session over a catalog source and an auth service
#[derive(Debug)]
pub struct Shell<S, A> {
    list: ProductListController<S>,
    login: LoginFlow<A>,
    route: Route,
}

impl<S: CatalogSource, A: AuthService> Shell<S, A> {
    /// New session on the login screen
    pub const fn new(list: ProductListController<S>, login: LoginFlow<A>) -> Self {
        Self {
            list,
            login,
            route: Route::Login,
        }
    }

    /// Screen currently shown
    #[must_use]
    pub const fn route(&self) -> Route {
        self.route
    }

    /// Product list state
    #[must_use]
    pub const fn list(&self) -> &ProductListController<S> {
        &self.list
    }

    /// Run one command
    pub async fn execute(&mut self, command: ShellCommand) -> Reply {
        debug!(?command, route = %self.route, "Shell command");
        let text = match command {
            ShellCommand::Quit => return Reply::Quit,
            ShellCommand::Help => HELP.to_string(),
            ShellCommand::Login(form) => self.log_in(&form).await,
            ShellCommand::Logout => match self.login.logout() {
                Ok(()) => {
                    self.go_to(Route::Login);
                    format!("Logged out, now at {}", Route::Login)
                }
                Err(e) => storage_failure(&e),
            },
            ShellCommand::Open(path) => self.open(&path).await,
            ShellCommand::Field(field, value) => self.fill_form(field, value),
            ShellCommand::Save => self.save_form(),
            ShellCommand::Cancel => {
                self.list.close_add_form();
                "Form closed".to_string()
            }
            guarded => match self.guard() {
                Ok(()) => self.products_command(guarded).await,
                Err(message) => message,
            },
        };
        Reply::Text(text)
    }

    /// Read commands from `input` until `quit` or end of input
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        loop {
            output.write_all(PROMPT.as_bytes()).await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let reply = match line.parse::<ShellCommand>() {
                Ok(command) => self.execute(command).await,
                Err(e) => Reply::Text(e.to_string()),
            };
            match reply {
                Reply::Quit => break,
                Reply::Text(text) => {
                    output.write_all(text.as_bytes()).await?;
                    if !text.ends_with('\n') {
                        output.write_all(b"\n").await?;
                    }
                }
            }
        }
        output.flush().await
    }

    /// Switch screens; leaving the product list discards its state
    fn go_to(&mut self, route: Route) {
        if self.route == Route::Products && route != Route::Products {
            self.list.reset();
        }
        self.route = route;
    }

    fn guard(&mut self) -> Result<(), String> {
        match RouteGuard::require(self.login.store()) {
            Ok(_) => {
                self.go_to(Route::Products);
                Ok(())
            }
            Err(GuardError::NotAuthenticated) => {
                self.go_to(Route::Login);
                Err(format!("Not logged in, redirected to {}", Route::Login))
            }
            Err(GuardError::Storage(e)) => Err(storage_failure(&e)),
        }
    }

    async fn log_in(&mut self, form: &LoginForm) -> String {
        match self.login.submit(form).await {
            Ok(_) => {
                self.go_to(Route::Products);
                self.show(false).await
            }
            Err(LoginError::Invalid(errors)) => render_field_errors(&errors),
            Err(LoginError::Failed(message)) => message.to_string(),
            Err(LoginError::Storage(e)) => storage_failure(&e),
        }
    }

    async fn open(&mut self, path: &str) -> String {
        match RouteGuard::navigate(path, self.login.store()) {
            Ok(Navigation::Render(Route::Products)) => {
                self.go_to(Route::Products);
                self.show(false).await
            }
            Ok(Navigation::Render(route)) => {
                self.go_to(route);
                format!("At {route}: log in with 'login <username> <password> [--remember]'")
            }
            Ok(Navigation::Redirect(route)) => {
                self.go_to(route);
                format!("Redirected to {route}")
            }
            Err(e) => storage_failure(&e),
        }
    }

    async fn products_command(&mut self, command: ShellCommand) -> String {
        match command {
            ShellCommand::Search(term) => {
                self.list.set_search(term);
                self.list.settle().await;
                self.show(false).await
            }
            ShellCommand::Sort(field) => {
                self.list.toggle_sort(field);
                self.show(false).await
            }
            ShellCommand::Page(n) => {
                self.list.set_page(n);
                self.show(false).await
            }
            ShellCommand::Next => {
                self.list.next_page();
                self.show(false).await
            }
            ShellCommand::Prev => {
                self.list.prev_page();
                self.show(false).await
            }
            ShellCommand::Refresh => self.show(true).await,
            ShellCommand::Add => {
                self.list.open_add_form();
                "Add product: set title, price, brand and sku, then save or cancel".to_string()
            }
            _ => self.show(false).await,
        }
    }

    async fn show(&mut self, refetch: bool) -> String {
        if refetch {
            self.list.refetch().await;
        } else {
            self.list.fetch_page().await;
        }
        render_products(&self.list.view())
    }

    fn fill_form(&mut self, field: AddProductField, value: String) -> String {
        if !self.list.add_form().open {
            return "No form is open, use 'add' first".to_string();
        }
        self.list.update_add_form(field, value);
        "ok".to_string()
    }

    fn save_form(&mut self) -> String {
        if !self.list.add_form().open {
            return "No form is open, use 'add' first".to_string();
        }
        match self.list.submit_add_form() {
            Ok(product) => {
                let mut text = format!("Added '{}' (id {})\n", product.title, product.id);
                if self.list.query().page() == 1 {
                    text.push_str(&render_products(&self.list.view()));
                }
                text
            }
            Err(errors) => render_field_errors(&errors),
        }
    }
}

fn storage_failure(e: &dyn std::error::Error) -> String {
    error!(error = %e, "Token storage failed");
    format!("Token storage error: {e}")
}
