use crate::errors::PipelineError;
use crate::finder::InteractorFinder;
use crate::ranking::context::{RankingContext, RankingServices};
use crate::ranking::step::RankingStep;
use crate::ranking::steps::default_steps;
use crate::ranking::summary::{pivot_rows, summary_rows, Summary, SummaryRow};
use chrono::{Local, NaiveDate};
use dif_domain::{CacheRepository, InteractorQuery, ScoringRules, TrialCriteria};
use dif_providers::{BioAssaySource, GraphStore};
use log::{info, warn};
use std::sync::Arc;

/// Puntúa los interactores druggables de un objetivo.
///
/// Usa el `InteractorFinder` para obtener los pares (fármaco, interactor),
/// ejecuta los pasos del ranking en orden y construye la tabla resumen. Todo
/// lo que se descarga queda en la caché, de modo que una segunda ejecución
/// no necesita los servicios remotos.
pub struct Ranker {
  finder: InteractorFinder,
  services: RankingServices,
  rules: ScoringRules,
  criteria: TrialCriteria,
  today: NaiveDate,
  steps: Vec<Box<dyn RankingStep>>,
  rows: Option<Vec<SummaryRow>>,
}

impl Ranker {
  pub fn new(graph: Arc<dyn GraphStore>,
             cache: Arc<dyn CacheRepository>,
             bioassays: Arc<dyn BioAssaySource>,
             query: InteractorQuery)
             -> Self {
    let finder = InteractorFinder::new(graph.clone(), cache.clone(), query);
    Self { finder,
           services: RankingServices { graph, cache, bioassays, print_sql: false },
           rules: ScoringRules::default(),
           criteria: TrialCriteria::default(),
           today: Local::now().date_naive(),
           steps: default_steps(),
           rows: None }
  }

  pub fn with_rules(mut self, rules: ScoringRules) -> Self {
    self.rules = rules;
    self
  }

  pub fn with_criteria(mut self, criteria: TrialCriteria) -> Self {
    self.criteria = criteria;
    self
  }

  /// Fecha de referencia para decidir si una patente ha expirado.
  pub fn with_today(mut self, today: NaiveDate) -> Self {
    self.today = today;
    self
  }

  pub fn with_print_sql(mut self, print_sql: bool) -> Self {
    self.finder = self.finder.with_print_sql(print_sql);
    self.services.print_sql = print_sql;
    self
  }

  /// Sustituye los pasos del ranking.
  pub fn with_steps(mut self, steps: Vec<Box<dyn RankingStep>>) -> Self {
    self.steps = steps;
    self
  }

  pub fn finder(&self) -> &InteractorFinder {
    &self.finder
  }

  /// Ejecuta el ranking completo y devuelve una fila por par
  /// (fármaco, interactor).
  pub fn rank(&mut self) -> Result<Vec<SummaryRow>, PipelineError> {
    let druggable = self.finder.druggable_interactors()?;
    if druggable.is_empty() {
      warn!("sin interactores druggables para {}", self.finder.query().node_name());
    }
    let mut ctx = RankingContext::new(&druggable, self.services.clone(), self.rules, self.criteria.clone(), self.today);
    for step in &self.steps {
      info!("paso del ranking: {}", step.name());
      step.execute(&mut ctx)?;
    }
    let rows = summary_rows(&ctx);
    self.rows = Some(rows.clone());
    Ok(rows)
  }

  /// Tabla resumen. Con `pivot` agrupa por interactor. Ejecuta el ranking
  /// si todavía no se ha hecho.
  pub fn summarize(&mut self, pivot: bool) -> Result<Summary, PipelineError> {
    let rows = match &self.rows {
      Some(rows) => rows.clone(),
      None => self.rank()?,
    };
    Ok(if pivot { Summary::Pivot(pivot_rows(&rows)) } else { Summary::Pairs(rows) })
  }
}
