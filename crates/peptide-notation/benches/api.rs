use divan::{AllocProfiler, black_box};
use peptide_notation::{Notation, Peptide};

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

const BILN: [&str; 4] = [
    "A-C-G",
    "A-C(1,1)-G.T-C(1,2)-K",
    "Ac-C(1,3)-Nle-D-C(1,3)-am",
    "K(1,3)(2,3)-E.E(1,3).D(2,3)-G",
];
const HELM: [&str; 3] = [
    "PEPTIDE5{A.[Cys].G}$$$$V2.0",
    "PEPTIDE1{A.C.G}|PEPTIDE2{T.C.K}$PEPTIDE1,PEPTIDE2,2:R1-2:R2$$$V2.0",
    "PEPTIDE7{[Ac].C.A}|PEPTIDE3{C.[am]}$PEPTIDE3,PEPTIDE7,1:R3-2:R3$$$V2.0",
];

fn main() {
    divan::main();
}

mod parsing {
    use super::*;

    #[divan::bench]
    fn parse_biln() {
        for biln in BILN {
            black_box(Peptide::from_biln(biln).unwrap());
        }
    }

    #[divan::bench]
    fn parse_helm() {
        for helm in HELM {
            black_box(Peptide::from_helm(helm).unwrap());
        }
    }
}

mod rendering {
    use super::*;

    #[divan::bench(args = [Notation::Biln, Notation::Helm])]
    fn render(bencher: divan::Bencher, notation: Notation) {
        let peptides: Vec<_> = BILN
            .into_iter()
            .map(|biln| Peptide::from_biln(biln).unwrap())
            .collect();
        bencher.bench(|| {
            for peptide in &peptides {
                black_box(peptide.render(notation));
            }
        });
    }
}
