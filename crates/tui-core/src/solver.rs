//! Exact-rational Cassowary simplex solver.
//!
//! This is a from-scratch implementation of the incremental Cassowary
//! algorithm (Badros, Borning & Stuckey) specialized for the 1-D segment
//! layout problem the layout engine builds on top of it. There is no
//! floating point anywhere in the tableau: every row entry is a
//! [`Fraction`], so repeated `addConstraint`/`removeConstraint`/
//! `suggestValue` cycles never drift.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::thread::ThreadId;

use tracing::trace;

use crate::error::{Result, TuiError};
use crate::fraction::Fraction;

/// A handle identifying a user-facing layout variable.
///
/// Two `Variable`s are equal only if they came from the same [`Variable::new`]
/// call; there is no interning by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Variable(u64);

static NEXT_VARIABLE_ID: AtomicU64 = AtomicU64::new(0);

impl Variable {
    /// Allocate a fresh, globally unique variable.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(NEXT_VARIABLE_ID.fetch_add(1, AtomicOrdering::Relaxed))
    }
}

/// The role an internal tableau symbol plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// Corresponds directly to a user [`Variable`].
    External,
    /// Introduced to convert an inequality into an equality.
    Slack,
    /// Introduced for a non-required constraint; penalized in the objective.
    Error,
    /// Introduced for a required equality; never penalized, never enters.
    Dummy,
}

/// A unique tableau row/column identity, tagged with its [`SymbolKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Symbol {
    id: u64,
    kind: SymbolKind,
}

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(0);

impl Symbol {
    fn new(kind: SymbolKind) -> Self {
        Self {
            id: NEXT_SYMBOL_ID.fetch_add(1, AtomicOrdering::Relaxed),
            kind,
        }
    }

    /// The kind of this symbol.
    pub const fn kind(self) -> SymbolKind {
        self.kind
    }

    const fn id(self) -> u64 {
        self.id
    }
}

/// One `coefficient * variable` term of an [`Expression`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Term {
    /// The variable.
    pub variable: Variable,
    /// Its coefficient.
    pub coefficient: Fraction,
}

impl Term {
    /// Create a new term.
    pub const fn new(variable: Variable, coefficient: Fraction) -> Self {
        Self {
            variable,
            coefficient,
        }
    }
}

/// A linear combination of variables plus a constant: `Σ cᵢ·xᵢ + constant`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expression {
    /// The variable terms.
    pub terms: Vec<Term>,
    /// The constant offset.
    pub constant: Fraction,
}

impl Expression {
    /// Create an expression from explicit terms and a constant.
    pub fn new(terms: Vec<Term>, constant: Fraction) -> Self {
        Self { terms, constant }
    }

    /// A constant expression with no variable terms.
    pub fn from_constant(constant: Fraction) -> Self {
        Self {
            terms: Vec::new(),
            constant,
        }
    }

    /// A single-term expression `1 * term`.
    pub fn from_term(term: Term) -> Self {
        Self {
            terms: vec![term],
            constant: Fraction::ZERO,
        }
    }

    /// A single-variable expression with coefficient 1.
    pub fn from_variable(variable: Variable) -> Self {
        Self::from_term(Term::new(variable, Fraction::ONE))
    }
}

/// Priority class attached to a [`Constraint`].
///
/// Combines into a scalar via `strong*10^6 + medium*10^3 + weak`, so a
/// constraint at a higher tier always outranks any combination of lower
/// tiers, while constraints within a tier trade off proportionally to
/// their component's magnitude.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Strength {
    /// Strong component.
    pub strong: Fraction,
    /// Medium component.
    pub medium: Fraction,
    /// Weak component.
    pub weak: Fraction,
}

impl Strength {
    /// A required constraint: must always hold, or `addConstraint` fails.
    pub const REQUIRED: Strength = Strength::new(
        Fraction::from_integer(1000),
        Fraction::from_integer(1000),
        Fraction::from_integer(1000),
    );
    /// The default strong tier.
    pub const STRONG: Strength = Strength::new(Fraction::ONE, Fraction::ZERO, Fraction::ZERO);
    /// The default medium tier.
    pub const MEDIUM: Strength = Strength::new(Fraction::ZERO, Fraction::ONE, Fraction::ZERO);
    /// The default weak tier.
    pub const WEAK: Strength = Strength::new(Fraction::ZERO, Fraction::ZERO, Fraction::ONE);

    /// Build a strength from its three components.
    pub const fn new(strong: Fraction, medium: Fraction, weak: Fraction) -> Self {
        Self {
            strong,
            medium,
            weak,
        }
    }

    /// Collapse the three components into a single scalar used as an
    /// objective-row weight.
    pub fn value(self) -> Result<Fraction> {
        let s = self.strong.mul(Fraction::from_integer(1_000_000))?;
        let m = self.medium.mul(Fraction::from_integer(1_000))?;
        s.add(m)?.add(self.weak)
    }

    /// Returns true if this is the required strength.
    pub fn is_required(self) -> bool {
        self == Self::REQUIRED
    }
}

/// The relational operator of a [`Constraint`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Relation {
    /// `expression == 0`.
    Eq,
    /// `expression <= 0`.
    Le,
    /// `expression >= 0`.
    Ge,
}

/// A single constraint: `expression relation 0`, weighted by `strength`.
///
/// Identity is by construction order, not by structural equality — two
/// constraints built from equal expressions are still distinct constraints
/// and must each be removed individually.
#[derive(Clone, Debug)]
pub struct Constraint {
    id: u64,
    /// The constrained expression.
    pub expression: Expression,
    /// The relational operator.
    pub relation: Relation,
    /// The priority this constraint is enforced at.
    pub strength: Strength,
}

static NEXT_CONSTRAINT_ID: AtomicU64 = AtomicU64::new(0);

impl Constraint {
    /// Create a new constraint.
    pub fn new(expression: Expression, relation: Relation, strength: Strength) -> Self {
        Self {
            id: NEXT_CONSTRAINT_ID.fetch_add(1, AtomicOrdering::Relaxed),
            expression,
            relation,
            strength,
        }
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }
}

impl PartialEq for Constraint {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for Constraint {}

/// One row of the simplex tableau: the basic symbol that keys this row
/// equals `constant + Σ coefficient·symbol` over the non-basic symbols in
/// `cells`. The basic symbol itself is never a key of `cells`.
#[derive(Clone, Debug)]
struct Row {
    constant: Fraction,
    cells: HashMap<Symbol, Fraction>,
}

impl Row {
    fn new(constant: Fraction) -> Self {
        Self {
            constant,
            cells: HashMap::new(),
        }
    }

    fn insert_symbol_with_coefficient(&mut self, symbol: Symbol, coefficient: Fraction) -> Result<()> {
        let current = *self.cells.get(&symbol).unwrap_or(&Fraction::ZERO);
        let updated = current.add(coefficient)?;
        if updated.is_zero() {
            self.cells.remove(&symbol);
        } else {
            self.cells.insert(symbol, updated);
        }
        Ok(())
    }

    fn insert_symbol(&mut self, symbol: Symbol) -> Result<()> {
        self.insert_symbol_with_coefficient(symbol, Fraction::ONE)
    }

    /// Fold `coefficient * other` into this row (used both when building a
    /// new row from an already-basic variable, and when substituting a
    /// pivoted-in symbol's expression into every row that references it).
    fn insert_row(&mut self, other: &Row, coefficient: Fraction) -> Result<()> {
        self.constant = self.constant.add(other.constant.mul(coefficient)?)?;
        for (&symbol, &coeff) in &other.cells {
            self.insert_symbol_with_coefficient(symbol, coeff.mul(coefficient)?)?;
        }
        Ok(())
    }

    fn reverse_sign(&mut self) {
        self.constant = self.constant.negate();
        for coeff in self.cells.values_mut() {
            *coeff = coeff.negate();
        }
    }

    /// Re-key this row from its implicit current subject to `symbol`,
    /// which must currently appear in `cells` with a non-zero coefficient.
    fn solve_for(&mut self, symbol: Symbol) -> Result<()> {
        let coeff = self
            .cells
            .remove(&symbol)
            .ok_or_else(|| TuiError::InternalSolverError("pivot symbol missing from row".into()))?;
        let multiplier = Fraction::ONE.negate().div(coeff)?;
        self.constant = self.constant.mul(multiplier)?;
        for v in self.cells.values_mut() {
            *v = v.mul(multiplier)?;
        }
        Ok(())
    }

    /// Replace every occurrence of `symbol` in this row with `row`'s
    /// expression (because `symbol` has just become basic, defined by
    /// `row`).
    fn substitute(&mut self, symbol: Symbol, row: &Row) -> Result<()> {
        if let Some(coeff) = self.cells.remove(&symbol) {
            self.insert_row(row, coeff)?;
        }
        Ok(())
    }

    fn remove_symbol(&mut self, symbol: Symbol) {
        self.cells.remove(&symbol);
    }
}

/// The marker/other symbol pair a constraint introduced, needed to remove
/// it again later.
#[derive(Clone, Copy, Debug)]
struct Tag {
    marker: Symbol,
    other: Option<Symbol>,
}

#[derive(Clone)]
struct EditInfo {
    constraint: Constraint,
    tag: Tag,
    constant: Fraction,
}

/// An incremental Cassowary constraint solver.
///
/// Solvers are not `Send`/`Sync` by design: every mutating and reading
/// operation asserts it is called from the thread that created the
/// solver, matching the single-render-thread ownership model the rest of
/// the engine assumes. A call from any other thread fails with
/// [`TuiError::WrongThreadError`] rather than silently racing.
pub struct Solver {
    owner_thread: ThreadId,
    var_symbols: HashMap<Variable, Symbol>,
    rows: HashMap<Symbol, Row>,
    objective: Row,
    constraints: HashMap<u64, (Constraint, Tag)>,
    edits: HashMap<Variable, EditInfo>,
}

impl Solver {
    /// Create a new, empty solver owned by the calling thread.
    pub fn new() -> Self {
        Self {
            owner_thread: std::thread::current().id(),
            var_symbols: HashMap::new(),
            rows: HashMap::new(),
            objective: Row::new(Fraction::ZERO),
            constraints: HashMap::new(),
            edits: HashMap::new(),
        }
    }

    fn assert_render_thread(&self) -> Result<()> {
        if std::thread::current().id() != self.owner_thread {
            return Err(TuiError::WrongThreadError(
                "solver accessed from a thread other than the one that created it".into(),
            ));
        }
        Ok(())
    }

    fn symbol_for_variable(&mut self, variable: Variable) -> Symbol {
        *self
            .var_symbols
            .entry(variable)
            .or_insert_with(|| Symbol::new(SymbolKind::External))
    }

    fn substitute(&mut self, symbol: Symbol, row: &Row) -> Result<()> {
        for r in self.rows.values_mut() {
            r.substitute(symbol, row)?;
        }
        self.objective.substitute(symbol, row)
    }

    fn create_row(&mut self, constraint: &Constraint) -> Result<(Row, Tag)> {
        let mut row = Row::new(constraint.expression.constant);
        for term in &constraint.expression.terms {
            if term.coefficient.is_zero() {
                continue;
            }
            let symbol = self.symbol_for_variable(term.variable);
            if let Some(existing) = self.rows.get(&symbol).cloned() {
                row.insert_row(&existing, term.coefficient)?;
            } else {
                row.insert_symbol_with_coefficient(symbol, term.coefficient)?;
            }
        }

        let mut tag = Tag {
            marker: Symbol::new(SymbolKind::Dummy),
            other: None,
        };

        match constraint.relation {
            Relation::Le | Relation::Ge => {
                let coeff = if constraint.relation == Relation::Le {
                    Fraction::ONE
                } else {
                    Fraction::ONE.negate()
                };
                let slack = Symbol::new(SymbolKind::Slack);
                tag.marker = slack;
                row.insert_symbol_with_coefficient(slack, coeff)?;
                if !constraint.strength.is_required() {
                    let error = Symbol::new(SymbolKind::Error);
                    tag.other = Some(error);
                    row.insert_symbol_with_coefficient(error, coeff.negate())?;
                    let weight = constraint.strength.value()?;
                    self.objective.insert_symbol_with_coefficient(error, weight)?;
                }
            }
            Relation::Eq => {
                if constraint.strength.is_required() {
                    let dummy = Symbol::new(SymbolKind::Dummy);
                    tag.marker = dummy;
                    row.insert_symbol(dummy)?;
                } else {
                    let error_plus = Symbol::new(SymbolKind::Error);
                    let error_minus = Symbol::new(SymbolKind::Error);
                    tag.marker = error_plus;
                    tag.other = Some(error_minus);
                    row.insert_symbol_with_coefficient(error_plus, Fraction::ONE)?;
                    row.insert_symbol_with_coefficient(error_minus, Fraction::ONE.negate())?;
                    let weight = constraint.strength.value()?;
                    self.objective
                        .insert_symbol_with_coefficient(error_plus, weight)?;
                    self.objective
                        .insert_symbol_with_coefficient(error_minus, weight)?;
                }
            }
        }

        if row.constant.is_negative() {
            row.reverse_sign();
        }

        Ok((row, tag))
    }

    fn choose_subject(row: &Row, tag: &Tag) -> Option<Symbol> {
        if let Some(external) = row
            .cells
            .iter()
            .filter(|(&s, _)| s.kind() == SymbolKind::External)
            .map(|(&s, _)| s)
            .min_by_key(Symbol::id)
        {
            return Some(external);
        }
        if matches!(tag.marker.kind(), SymbolKind::Slack | SymbolKind::Error)
            && row.cells.get(&tag.marker).is_some_and(|c| c.is_negative())
        {
            return Some(tag.marker);
        }
        if let Some(other) = tag.other
            && matches!(other.kind(), SymbolKind::Slack | SymbolKind::Error)
            && row.cells.get(&other).is_some_and(|c| c.is_negative())
        {
            return Some(other);
        }
        None
    }

    fn any_pivotable_symbol(row: &Row) -> Option<Symbol> {
        row.cells
            .keys()
            .filter(|s| s.kind() != SymbolKind::Dummy)
            .min_by_key(|s| s.id())
            .copied()
    }

    /// Generic Cassowary `optimize`: drive `objective` (which may be the
    /// solver's real objective, or a transient artificial one) to a
    /// minimum by repeatedly pivoting the shared tableau in `self.rows`.
    fn optimize(&mut self, objective: &mut Row) -> Result<()> {
        loop {
            let entering = objective
                .cells
                .iter()
                .filter(|(&s, &c)| s.kind() != SymbolKind::Dummy && c.is_negative())
                .map(|(&s, _)| s)
                .min_by_key(Symbol::id);
            let Some(entering) = entering else {
                return Ok(());
            };

            let mut best: Option<(Fraction, Symbol)> = None;
            for (&basic, row) in self.rows.iter() {
                if basic.kind() == SymbolKind::External {
                    continue;
                }
                let Some(&coeff) = row.cells.get(&entering) else {
                    continue;
                };
                if !coeff.is_negative() {
                    continue;
                }
                let ratio = row.constant.negate().div(coeff)?;
                best = Some(match best {
                    None => (ratio, basic),
                    Some((best_ratio, best_sym)) => {
                        if ratio.compare(best_ratio) == Ordering::Less
                            || (ratio.compare(best_ratio) == Ordering::Equal
                                && basic.id() < best_sym.id())
                        {
                            (ratio, basic)
                        } else {
                            (best_ratio, best_sym)
                        }
                    }
                });
            }

            let Some((_, leaving)) = best else {
                return Err(TuiError::InternalSolverError(
                    "optimize: unbounded objective, no leaving row".into(),
                ));
            };

            let mut row = self.rows.remove(&leaving).ok_or_else(|| {
                TuiError::InternalSolverError("optimize: leaving row vanished".into())
            })?;
            row.solve_for(entering)?;
            self.substitute(entering, &row)?;
            objective.substitute(entering, &row)?;
            self.rows.insert(entering, row);
        }
    }

    fn optimize_objective(&mut self) -> Result<()> {
        let mut objective = std::mem::replace(&mut self.objective, Row::new(Fraction::ZERO));
        let result = self.optimize(&mut objective);
        self.objective = objective;
        result
    }

    fn add_with_artificial_variable(&mut self, row: Row) -> Result<bool> {
        let artificial = Symbol::new(SymbolKind::Slack);
        self.rows.insert(artificial, row.clone());
        let mut artificial_objective = row;
        self.optimize(&mut artificial_objective)?;
        let success = artificial_objective.constant.is_zero();

        if let Some(mut pivoted) = self.rows.remove(&artificial)
            && !pivoted.cells.is_empty()
        {
            if let Some(entering) = Self::any_pivotable_symbol(&pivoted) {
                pivoted.solve_for(entering)?;
                self.substitute(entering, &pivoted)?;
                self.rows.insert(entering, pivoted);
            } else if !success {
                return Err(TuiError::UnsatisfiableConstraint(
                    "artificial variable row has no pivotable symbol".into(),
                ));
            }
        }

        for row in self.rows.values_mut() {
            row.remove_symbol(artificial);
        }
        self.objective.remove_symbol(artificial);
        Ok(success)
    }

    /// Add a constraint to the solver.
    ///
    /// Fails with [`TuiError::DuplicateConstraint`] if this exact
    /// constraint (by identity) was already added, or
    /// [`TuiError::UnsatisfiableConstraint`] if it is required and
    /// contradicts the constraints already present.
    pub fn add_constraint(&mut self, constraint: Constraint) -> Result<()> {
        self.assert_render_thread()?;
        if self.constraints.contains_key(&constraint.id()) {
            return Err(TuiError::DuplicateConstraint(
                "this constraint was already added to the solver".into(),
            ));
        }

        let (mut row, tag) = self.create_row(&constraint)?;
        let mut subject = Self::choose_subject(&row, &tag);

        if subject.is_none() && row.cells.keys().all(|s| s.kind() == SymbolKind::Dummy) {
            if !row.constant.is_zero() {
                trace!("required constraint rejected: no feasible solution");
                return Err(TuiError::UnsatisfiableConstraint(
                    "required constraint has no feasible solution".into(),
                ));
            }
            subject = Some(tag.marker);
        }

        match subject {
            Some(subject_symbol) => {
                row.solve_for(subject_symbol)?;
                self.substitute(subject_symbol, &row)?;
                self.rows.insert(subject_symbol, row);
            }
            None => {
                if !self.add_with_artificial_variable(row)? {
                    return Err(TuiError::UnsatisfiableConstraint(
                        "constraint has no feasible solution".into(),
                    ));
                }
            }
        }

        self.constraints.insert(constraint.id(), (constraint, tag));
        self.optimize_objective()
    }

    fn remove_marker_effects(&mut self, marker: Symbol, weight: Fraction) -> Result<()> {
        if let Some(row) = self.rows.get(&marker).cloned() {
            self.objective.insert_row(&row, weight.negate())?;
        } else {
            self.objective
                .insert_symbol_with_coefficient(marker, weight.negate())?;
        }
        Ok(())
    }

    fn find_pivot_row_for_marker(&self, marker: Symbol) -> Result<Symbol> {
        let mut negative: Option<(Fraction, Symbol)> = None;
        let mut positive: Option<(Fraction, Symbol)> = None;
        let mut any: Option<Symbol> = None;

        for (&basic, row) in self.rows.iter() {
            let Some(&coeff) = row.cells.get(&marker) else {
                continue;
            };
            if coeff.is_negative() {
                let ratio = row.constant.negate().div(coeff)?;
                negative = Some(match negative {
                    None => (ratio, basic),
                    Some((best_ratio, best_sym)) => {
                        if ratio.compare(best_ratio) == Ordering::Less
                            || (ratio.compare(best_ratio) == Ordering::Equal
                                && basic.id() < best_sym.id())
                        {
                            (ratio, basic)
                        } else {
                            (best_ratio, best_sym)
                        }
                    }
                });
            } else if coeff.is_positive() {
                let ratio = row.constant.div(coeff)?;
                positive = Some(match positive {
                    None => (ratio, basic),
                    Some((best_ratio, best_sym)) => {
                        if ratio.compare(best_ratio) == Ordering::Less
                            || (ratio.compare(best_ratio) == Ordering::Equal
                                && basic.id() < best_sym.id())
                        {
                            (ratio, basic)
                        } else {
                            (best_ratio, best_sym)
                        }
                    }
                });
            }
            if any.is_none_or(|a| basic.kind() == SymbolKind::External && a.kind() != SymbolKind::External)
            {
                any = Some(basic);
            }
        }

        if let Some((_, sym)) = negative {
            return Ok(sym);
        }
        if let Some((_, sym)) = positive {
            return Ok(sym);
        }
        any.ok_or_else(|| {
            TuiError::InternalSolverError("no row references the constraint's marker symbol".into())
        })
    }

    /// Remove a previously added constraint.
    ///
    /// Fails with [`TuiError::UnknownConstraint`] if this constraint (by
    /// identity) is not currently in the solver.
    pub fn remove_constraint(&mut self, constraint: &Constraint) -> Result<()> {
        self.assert_render_thread()?;
        let Some((removed, tag)) = self.constraints.remove(&constraint.id()) else {
            return Err(TuiError::UnknownConstraint(
                "this constraint was not found in the solver".into(),
            ));
        };

        let weight = removed.strength.value()?;
        if tag.marker.kind() == SymbolKind::Error {
            self.remove_marker_effects(tag.marker, weight)?;
        }
        if let Some(other) = tag.other
            && other.kind() == SymbolKind::Error
        {
            self.remove_marker_effects(other, weight)?;
        }

        if self.rows.remove(&tag.marker).is_none() {
            let leaving = self.find_pivot_row_for_marker(tag.marker)?;
            let mut row = self.rows.remove(&leaving).ok_or_else(|| {
                TuiError::InternalSolverError("pivot row vanished during removeConstraint".into())
            })?;
            row.solve_for(tag.marker)?;
            self.substitute(tag.marker, &row)?;
        }

        self.optimize_objective()
    }

    /// Returns true if an equal-by-identity constraint is currently active.
    pub fn has_constraint(&self, constraint: &Constraint) -> bool {
        self.constraints.contains_key(&constraint.id())
    }

    /// Register `var` as an edit variable at `strength` (must not be
    /// [`Strength::REQUIRED`]), so its value can be adjusted cheaply via
    /// [`Solver::suggest_value`] without a full constraint rebuild.
    pub fn add_edit_variable(&mut self, var: Variable, strength: Strength) -> Result<()> {
        self.assert_render_thread()?;
        if self.edits.contains_key(&var) {
            return Err(TuiError::DuplicateConstraint(
                "variable already has an edit constraint".into(),
            ));
        }
        if strength.is_required() {
            return Err(TuiError::InternalSolverError(
                "edit variables must use a non-required strength".into(),
            ));
        }

        let constraint = Constraint::new(
            Expression::from_variable(var),
            Relation::Eq,
            strength,
        );
        self.add_constraint(constraint.clone())?;
        let (_, tag) = self
            .constraints
            .get(&constraint.id())
            .cloned()
            .ok_or_else(|| {
                TuiError::InternalSolverError(
                    "edit constraint vanished immediately after insertion".into(),
                )
            })?;
        self.edits.insert(
            var,
            EditInfo {
                constraint,
                tag,
                constant: Fraction::ZERO,
            },
        );
        Ok(())
    }

    /// Remove an edit variable registered with [`Solver::add_edit_variable`].
    pub fn remove_edit_variable(&mut self, var: Variable) -> Result<()> {
        self.assert_render_thread()?;
        let edit = self.edits.remove(&var).ok_or_else(|| {
            TuiError::UnknownConstraint("variable has no edit constraint".into())
        })?;
        self.remove_constraint(&edit.constraint)
    }

    fn dual_optimize(&mut self) -> Result<()> {
        loop {
            let leaving = self
                .rows
                .iter()
                .filter(|(&basic, row)| {
                    basic.kind() != SymbolKind::External && row.constant.is_negative()
                })
                .min_by_key(|(&basic, _)| basic.id())
                .map(|(&basic, _)| basic);
            let Some(leaving) = leaving else {
                return Ok(());
            };

            let mut row = self.rows.remove(&leaving).ok_or_else(|| {
                TuiError::InternalSolverError("dual optimize: leaving row vanished".into())
            })?;

            let mut best: Option<(Fraction, Symbol)> = None;
            for (&sym, &coeff) in row.cells.iter() {
                if sym.kind() == SymbolKind::Dummy || !coeff.is_negative() {
                    continue;
                }
                let obj_coeff = *self.objective.cells.get(&sym).unwrap_or(&Fraction::ZERO);
                let ratio = obj_coeff.div(coeff)?.negate();
                best = Some(match best {
                    None => (ratio, sym),
                    Some((best_ratio, best_sym)) => {
                        if ratio.compare(best_ratio) == Ordering::Less
                            || (ratio.compare(best_ratio) == Ordering::Equal
                                && sym.id() < best_sym.id())
                        {
                            (ratio, sym)
                        } else {
                            (best_ratio, best_sym)
                        }
                    }
                });
            }

            let Some((_, entering)) = best else {
                return Err(TuiError::InternalSolverError(
                    "dual optimize: infeasible row has no viable entering symbol".into(),
                ));
            };

            row.solve_for(entering)?;
            self.substitute(entering, &row)?;
            self.rows.insert(entering, row);
        }
    }

    /// Suggest a new value for an edit variable, adjusting the tableau
    /// incrementally rather than rebuilding it.
    pub fn suggest_value(&mut self, var: Variable, value: Fraction) -> Result<()> {
        self.assert_render_thread()?;
        let mut edit = self
            .edits
            .get(&var)
            .cloned()
            .ok_or_else(|| TuiError::UnknownConstraint("variable has no edit constraint".into()))?;

        let delta = value.sub(edit.constant)?;
        edit.constant = value;
        self.edits.insert(var, edit.clone());

        if let Some(row) = self.rows.get_mut(&edit.tag.marker) {
            row.constant = row.constant.add(delta)?;
            return self.dual_optimize();
        }
        if let Some(other) = edit.tag.other
            && let Some(row) = self.rows.get_mut(&other)
        {
            row.constant = row.constant.sub(delta)?;
            return self.dual_optimize();
        }

        let marker = edit.tag.marker;
        for row in self.rows.values_mut() {
            if let Some(&coeff) = row.cells.get(&marker) {
                row.constant = row.constant.add(delta.mul(coeff)?)?;
            }
        }
        self.dual_optimize()
    }

    /// Resolve the current value of `var`: its basic row's constant, or
    /// zero if it is not (or no longer) part of any row.
    pub fn value_of(&self, var: Variable) -> Result<Fraction> {
        self.assert_render_thread()?;
        Ok(match self.var_symbols.get(&var) {
            Some(sym) => self
                .rows
                .get(sym)
                .map(|r| r.constant)
                .unwrap_or(Fraction::ZERO),
            None => Fraction::ZERO,
        })
    }

    /// Resolve the current values of several variables at once.
    pub fn update_variables(&self, vars: &[Variable]) -> Result<HashMap<Variable, Fraction>> {
        self.assert_render_thread()?;
        let mut out = HashMap::with_capacity(vars.len());
        for &v in vars {
            out.insert(v, self.value_of(v)?);
        }
        Ok(out)
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}
