use super::HandlerContext;
use crate::args::RefreshArgs;
use crate::engine::Engine;
use crate::snapshot::{RefreshPlan, Snapshot};
use anyhow::Result;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tfview_types::{Diagnostic, Diagnostics, ResourceAddr};
use tfview_views::{Operation, PlanMode, Refresh, ViewType, new_refresh};

struct Request {
    state: PathBuf,
    parallelism: usize,
    targets: Vec<ResourceAddr>,
}

pub fn handle(ctx: &HandlerContext, args: RefreshArgs) -> Result<ExitCode> {
    let view_type = args.view.unwrap_or(ViewType::from_flags(args.json));
    let refresh = new_refresh(view_type, Arc::clone(&ctx.view))?;

    let request = match parse_request(ctx, args) {
        Ok(request) => request,
        Err(diags) => {
            refresh.diagnostics(&diags);
            refresh.help_prompt();
            return Ok(ExitCode::FAILURE);
        }
    };

    let snapshot = match Snapshot::read(&request.state) {
        Ok(snapshot) => snapshot,
        Err(diag) => {
            refresh.diagnostics(&Diagnostics::from(vec![diag]));
            refresh.help_prompt();
            return Ok(ExitCode::FAILURE);
        }
    };

    let (mut plan, diags) = snapshot.into_plan();
    plan.retain_targets(&request.targets);
    plan.diagnostics.append(diags);
    tracing::info!(
        state = %request.state.display(),
        resources = plan.resources.len(),
        outputs = plan.outputs.len(),
        "snapshot loaded"
    );

    let op: Arc<dyn Operation> = Arc::from(refresh.operation());
    let cancel = Arc::new(AtomicBool::new(false));
    install_interrupt_handler(Interrupts::new(Arc::clone(&op), Arc::clone(&cancel)));

    Ok(execute(
        refresh.as_ref(),
        op.as_ref(),
        plan,
        request.parallelism,
        cancel,
    ))
}

/// Run the engine over `plan` and report the outcome. Outputs are rendered
/// only for a run that was neither cancelled nor failed.
fn execute(
    refresh: &dyn Refresh,
    op: &dyn Operation,
    mut plan: RefreshPlan,
    parallelism: usize,
    cancel: Arc<AtomicBool>,
) -> ExitCode {
    let engine = Engine::new(refresh.hooks(), parallelism, Arc::clone(&cancel));
    let engine_diags = engine.refresh(&plan.resources);

    let mut all = std::mem::take(&mut plan.diagnostics);
    all.append(engine_diags);

    if cancel.load(Ordering::SeqCst) {
        op.cancelled(PlanMode::RefreshOnly);
        op.diagnostics(&all);
        return ExitCode::FAILURE;
    }

    op.diagnostics(&all);
    if all.has_errors() {
        return ExitCode::FAILURE;
    }

    refresh.outputs(&plan.outputs);
    ExitCode::SUCCESS
}

fn parse_request(
    ctx: &HandlerContext,
    args: RefreshArgs,
) -> std::result::Result<Request, Diagnostics> {
    let mut diags = Diagnostics::new();

    let state = args.state.unwrap_or_default();
    if state.as_os_str().is_empty() {
        diags.push(Diagnostic::error(
            "No state file specified",
            "The refresh command needs a state snapshot. Pass one with --state.",
        ));
    }

    let parallelism = args.parallelism.unwrap_or(ctx.config.refresh.parallelism);
    if parallelism == 0 {
        diags.push(Diagnostic::error(
            "Invalid parallelism",
            "The parallelism must be greater than zero.",
        ));
    }

    let mut targets = Vec::with_capacity(args.targets.len());
    for raw in &args.targets {
        match raw.parse::<ResourceAddr>() {
            Ok(addr) => targets.push(addr),
            Err(err) => diags.push(Diagnostic::error(
                "Invalid target address",
                err.to_string(),
            )),
        }
    }

    if diags.has_errors() {
        return Err(diags);
    }
    Ok(Request {
        state,
        parallelism,
        targets,
    })
}

/// Interrupt bookkeeping for one run. The first interrupt stops scheduling
/// new resources; a second one asks for an immediate exit.
struct Interrupts {
    op: Arc<dyn Operation>,
    cancel: Arc<AtomicBool>,
    received: AtomicUsize,
}

impl Interrupts {
    fn new(op: Arc<dyn Operation>, cancel: Arc<AtomicBool>) -> Self {
        Self {
            op,
            cancel,
            received: AtomicUsize::new(0),
        }
    }

    /// Returns true when the process must exit now.
    fn receive(&self) -> bool {
        if self.received.fetch_add(1, Ordering::SeqCst) > 0 {
            self.op.fatal_interrupt();
            return true;
        }
        self.cancel.store(true, Ordering::SeqCst);
        self.op.interrupted();
        self.op.stopping();
        false
    }
}

fn install_interrupt_handler(interrupts: Interrupts) {
    let result = ctrlc::set_handler(move || {
        if interrupts.receive() {
            std::process::exit(1);
        }
    });

    if let Err(err) = result {
        tracing::warn!(error = %err, "failed to install interrupt handler");
    }
}
