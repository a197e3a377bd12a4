use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, anyhow};
use clap::{Args, Parser, Subcommand};
use colored::*;

use restpad::config::{Config, ConfigLoader};
use restpad::history::HistoryLog;
use restpad::history::printer::print_history;
use restpad::http::{Client, Method, RequestDraft};
use restpad::storage::{FileStore, KeyValueStore};
use restpad::utils::{ResponseFormat, ResponseFormatter};
use restpad::variable::{Variable, VariableStore};
use restpad::{Orchestrator, RequestCodec, RestpadError};

pub type Result<T> = std::result::Result<T, anyhow::Error>;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// 存储目录（覆盖配置文件和 RESTPAD_DATA_DIR）
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// 显示响应的 Content-Type 和完整响应体
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 发送请求并记录到历史
    Send(RequestArgs),

    /// 只生成可分享的请求路径，不发送
    Encode(RequestArgs),

    /// 打开一个请求路径
    Open {
        path: String,

        /// 解码后立即发送
        #[arg(long)]
        send: bool,
    },

    /// 管理变量
    Var {
        #[command(subcommand)]
        action: VarAction,
    },

    /// 查看历史记录
    History {
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
}

#[derive(Args)]
pub struct RequestArgs {
    /// GET, POST, PUT, PATCH, DELETE, HEAD, OPTIONS
    pub method: String,

    pub url: String,

    /// 请求头，格式 "Key: Value"，可重复
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,

    /// 请求体
    #[arg(short = 'd', long = "data")]
    pub body: Option<String>,
}

#[derive(Subcommand)]
pub enum VarAction {
    /// 新增或更新变量
    Set { name: String, value: String },
    /// 删除变量
    Rm { name: String },
    /// 列出所有变量
    List,
}

struct CliRunner {
    config: Config,
    variables: VariableStore,
    history: HistoryLog,
    verbose: bool,
}

impl CliRunner {
    fn new(data_dir: Option<PathBuf>, verbose: bool) -> Self {
        let config = ConfigLoader::find_and_load();
        let dir = data_dir.unwrap_or_else(|| config.resolve_data_dir());
        let backend: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir));

        Self {
            variables: VariableStore::load(backend.clone()),
            history: HistoryLog::new(backend),
            config,
            verbose,
        }
    }

    async fn run(mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Send(args) => {
                let draft = Self::parse_request(args)?;
                self.send(&draft).await
            }
            Commands::Encode(args) => {
                let draft = Self::parse_request(args)?;
                println!("{}", self.encode(&draft)?);
                Ok(())
            }
            Commands::Open { path, send } => {
                let draft = Orchestrator::open(&path);
                Self::print_draft(&draft);
                if send {
                    self.send(&draft).await?;
                }
                Ok(())
            }
            Commands::Var { action } => self.run_var(action),
            Commands::History { page } => {
                print_history(&self.history, page, self.config.page_size);
                Ok(())
            }
        }
    }

    fn orchestrator(&self) -> Orchestrator<'_> {
        Orchestrator::new(&self.variables, &self.history).with_defaults(&self.config.variables)
    }

    /// 只生成路径，不写入历史
    fn encode(&self, draft: &RequestDraft) -> Result<String> {
        let request = self.orchestrator().resolve(draft).map_err(Self::report)?;
        Ok(RequestCodec::encode(&request))
    }

    async fn send(&self, draft: &RequestDraft) -> Result<()> {
        let client = Client::with_timeout(self.config.timeout())?;
        let (submission, response) = self
            .orchestrator()
            .submit(draft, &client)
            .await
            .map_err(Self::report)?;

        let format = if self.verbose {
            ResponseFormat::Verbose
        } else {
            ResponseFormat::Compact
        };
        let formatter = ResponseFormatter::new(format);
        println!("{}", formatter.format(&response));
        println!("{} {}", "Path:".dimmed(), submission.path);
        Ok(())
    }

    fn run_var(&mut self, action: VarAction) -> Result<()> {
        match action {
            VarAction::Set { name, value } => {
                self.variables.add(Variable::new(name, value))?;
            }
            VarAction::Rm { name } => self.variables.remove(&name),
            VarAction::List => {
                if self.variables.is_empty() {
                    println!("No variables defined");
                }
                for variable in self.variables.list() {
                    println!("{} = {}", variable.name.bold(), variable.value);
                }
            }
        }
        Ok(())
    }

    fn parse_request(args: RequestArgs) -> Result<RequestDraft> {
        let method = Method::parse(&args.method.to_uppercase())?;
        let mut draft = RequestDraft::new(method, &args.url);

        for header in &args.headers {
            let (key, value) = header
                .split_once(':')
                .with_context(|| format!("Invalid header (expected \"Key: Value\"): {}", header))?;
            draft.headers.push(key.trim(), value.trim());
        }

        if let Some(body) = args.body {
            draft.body = body;
        }

        Ok(draft)
    }

    fn print_draft(draft: &RequestDraft) {
        println!("{} {}", draft.method.as_str().bold(), draft.url);
        for (key, value) in draft.headers.active_pairs() {
            println!("{}: {}", key, value);
        }
        if draft.method.allows_body() {
            println!();
            println!("{}", draft.body);
        }
    }

    /// 缺少变量时逐个列出变量名，错误本身只给出数量
    fn report(err: RestpadError) -> anyhow::Error {
        match err.missing_variables() {
            Some(names) => {
                for name in names {
                    eprintln!("{} {{{{{}}}}}", "missing variable:".yellow(), name);
                }
                anyhow!("request not sent: {} variable(s) undefined", names.len())
            }
            None => anyhow!(err),
        }
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let runner = CliRunner::new(cli.data_dir, cli.verbose);
    runner.run(cli.command).await
}
