//! Read-only seed data for the single tracked course.

use crate::model::Module;

const COURSE_TITLE: &str = "Infraestruturas Autônomas com IA";

const COURSE_DESCRIPTION: &str = "Aprenda a automatizar cargas de trabalho, prever falhas e \
operar ambientes híbridos usando arquiteturas autônomas impulsionadas por IA. Domine a próxima \
geração de gestão de data centers inteligentes.";

type ModuleSeed = (&'static str, &'static str, &'static [(&'static str, &'static str)]);

const MODULES: &[ModuleSeed] = &[
    (
        "m1",
        "Módulo 1 — Fundamentos de Infraestruturas Autônomas",
        &[
            ("l1", "Introdução às Infraestruturas"),
            ("l2", "Arquiteturas Autônomas"),
            ("l3", "Casos de Uso"),
        ],
    ),
    (
        "m2",
        "Módulo 2 — Automação em Ambientes Híbridos",
        &[
            ("l4", "Orquestração de Workloads Multi-Cluster"),
            ("l5", "Previsão de Falhas com Modelos Preditivos"),
            ("l6", "Respostas Autônomas a Incidentes"),
        ],
    ),
    (
        "m3",
        "Módulo 3 — Gestão e Observabilidade",
        &[
            ("l7", "Monitoramento e Telemetria"),
            ("l8", "SLA e SLO em Infraestruturas Inteligentes"),
        ],
    ),
];

/// Static definition of the course a session is materialized from.
///
/// Every call to [`CourseTemplate::modules`] builds fresh owned values, so a
/// returned copy never shares lesson state with the template or with any
/// other copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct CourseTemplate;

impl CourseTemplate {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        COURSE_TITLE
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        COURSE_DESCRIPTION
    }

    /// Fresh, all-incomplete copy of the course modules in display order.
    #[must_use]
    pub fn modules(&self) -> Vec<Module> {
        MODULES
            .iter()
            .map(|(id, title, lessons)| Module::from_titles(id, title, lessons))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_has_three_modules_and_eight_lessons() {
        let modules = CourseTemplate::new().modules();
        let sizes: Vec<usize> = modules.iter().map(Module::lesson_count).collect();
        assert_eq!(sizes, vec![3, 3, 2]);
        assert!(modules.iter().all(|m| m.completed_count() == 0));
    }

    #[test]
    fn ids_are_unique() {
        let modules = CourseTemplate::new().modules();
        let mut module_ids: Vec<&str> = modules.iter().map(|m| m.id().as_str()).collect();
        module_ids.dedup();
        assert_eq!(module_ids, vec!["m1", "m2", "m3"]);

        for module in &modules {
            let mut lesson_ids: Vec<&str> =
                module.lessons().iter().map(|l| l.id().as_str()).collect();
            let len = lesson_ids.len();
            lesson_ids.sort_unstable();
            lesson_ids.dedup();
            assert_eq!(lesson_ids.len(), len);
        }
    }

    #[test]
    fn copies_are_independent() {
        let template = CourseTemplate::new();
        let mut first = template.modules();
        first[0].lesson_mut("l1").unwrap().toggle();

        let second = template.modules();
        assert!(first[0].lesson("l1").unwrap().is_done());
        assert!(!second[0].lesson("l1").unwrap().is_done());
    }
}
