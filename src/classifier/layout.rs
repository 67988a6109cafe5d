use indexmap::{IndexMap, IndexSet};
use slotmap::SecondaryMap;
use tracing::{trace, trace_span};

use super::{ClassId, Classifier};

/// The evaluation layout computed when a classifier is set up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifierLayout {
    order: Vec<ClassId>,
    cyclic: IndexSet<ClassId>,
}

impl ClassifierLayout {
    /// Orders the classes of `classifier` so that every class comes after its superclass and
    /// after the targets of its relations, except where the dependency graph has cycles.
    ///
    /// Classes sharing a strongly connected component are marked as cyclic.
    pub(super) fn compute(classifier: &Classifier) -> Self {
        let span = trace_span!("ClassifierLayout::compute", classes = classifier.len());
        let _span = span.enter();

        let mut successors: IndexMap<ClassId, Vec<ClassId>> = classifier
            .iter()
            .map(|(id, class)| (id, class.superclass().into_iter().collect()))
            .collect();

        for dependency in classifier.dependencies() {
            let (Some(owner), Some(target)) = (
                classifier.id_of(&dependency.owner),
                classifier.id_of(&dependency.target),
            ) else {
                unreachable!("dependency {} refers to an unregistered class", dependency);
            };

            successors
                .get_mut(&owner)
                .expect("every registered class has a successor list")
                .push(target);
        }

        let mut tarjan = Tarjan {
            successors: &successors,
            index: SecondaryMap::new(),
            lowlink: SecondaryMap::new(),
            stack: vec![],
            on_stack: SecondaryMap::new(),
            next_index: 0,
            layout: Self::default(),
        };

        for &id in successors.keys() {
            if !tarjan.index.contains_key(id) {
                tarjan.strong_connect(id);
            }
        }

        tarjan.layout
    }

    pub fn order(&self) -> &[ClassId] {
        &self.order
    }

    pub fn is_cyclic(&self, id: ClassId) -> bool {
        self.cyclic.contains(&id)
    }

    pub fn cyclic(&self) -> impl Iterator<Item = ClassId> + '_ {
        self.cyclic.iter().copied()
    }
}

struct Tarjan<'a> {
    successors: &'a IndexMap<ClassId, Vec<ClassId>>,
    index: SecondaryMap<ClassId, usize>,
    lowlink: SecondaryMap<ClassId, usize>,
    stack: Vec<ClassId>,
    on_stack: SecondaryMap<ClassId, ()>,
    next_index: usize,
    layout: ClassifierLayout,
}

impl Tarjan<'_> {
    fn discover(&mut self, frames: &mut Vec<(ClassId, usize)>, node: ClassId) {
        self.index.insert(node, self.next_index);
        self.lowlink.insert(node, self.next_index);
        self.next_index += 1;
        self.stack.push(node);
        self.on_stack.insert(node, ());
        frames.push((node, 0));
    }

    /// Walks the graph from `root` with an explicit stack of `(node, next successor)` frames.
    fn strong_connect(&mut self, root: ClassId) {
        let successors = self.successors;
        let mut frames = vec![];
        self.discover(&mut frames, root);

        while let Some((node, next)) = frames.last_mut() {
            let node = *node;

            if let Some(&successor) = successors[&node].get(*next) {
                *next += 1;

                if !self.index.contains_key(successor) {
                    self.discover(&mut frames, successor);
                } else if self.on_stack.contains_key(successor) {
                    self.lowlink[node] = self.lowlink[node].min(self.index[successor]);
                }

                continue;
            }

            frames.pop();

            if let Some(&(parent, _)) = frames.last() {
                self.lowlink[parent] = self.lowlink[parent].min(self.lowlink[node]);
            }

            if self.lowlink[node] == self.index[node] {
                self.pop_component(node);
            }
        }
    }

    fn pop_component(&mut self, root: ClassId) {
        let mut component = vec![];

        loop {
            let member = self
                .stack
                .pop()
                .expect("the component root is still on the stack");
            self.on_stack.remove(member);
            component.push(member);

            if member == root {
                break;
            }
        }

        component.reverse();

        let cyclic = component.len() > 1 || self.successors[&root].contains(&root);
        trace!(?component, cyclic, "found a strongly connected component");

        if cyclic {
            self.layout.cyclic.extend(component.iter().copied());
        }

        self.layout.order.extend(component);
    }
}
