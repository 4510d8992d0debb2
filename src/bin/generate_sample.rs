use std::fs::File;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use lab_lookup::data::model::{SourceRow, columns};
use parquet::arrow::ArrowWriter;

/// Output files, kept apart from the real reference table.
const SAMPLE_CSV_PATH: &str = "sample_lab_tests.csv";
const SAMPLE_PARQUET_PATH: &str = "sample_lab_tests.parquet";

/// A handful of common LOINC tests spanning most categories.  The last row
/// has no class and no specimen to exercise the "Other" fallback.
const SAMPLE_TABLE: &str = "\
LOINC_NUM,COMPONENT,PROPERTY,SYSTEM,SCALE_TYP,METHOD_TYP,CLASS,SHORTNAME,LONG_COMMON_NAME\n\
2345-7,Glucose,MCnc,Ser/Plas,Qn,,CHEM,Glucose SerPl-mCnc,Glucose [Mass/volume] in Serum or Plasma\n\
2339-0,Glucose,MCnc,Bld,Qn,,CHEM,Glucose Bld-mCnc,Glucose [Mass/volume] in Blood\n\
2951-2,Sodium,SCnc,Ser/Plas,Qn,,CHEM,Sodium SerPl-sCnc,Sodium [Moles/volume] in Serum or Plasma\n\
2823-3,Potassium,SCnc,Ser/Plas,Qn,,CHEM,Potassium SerPl-sCnc,Potassium [Moles/volume] in Serum or Plasma\n\
2160-0,Creatinine,MCnc,Ser/Plas,Qn,,CHEM,Creat SerPl-mCnc,Creatinine [Mass/volume] in Serum or Plasma\n\
4548-4,Hemoglobin A1c/Hemoglobin.total,MFr,Bld,Qn,,CHEM,Hgb A1c MFr Bld,Hemoglobin A1c/Hemoglobin.total in Blood\n\
718-7,Hemoglobin,MCnc,Bld,Qn,,HEM/BC,Hgb Bld-mCnc,Hemoglobin [Mass/volume] in Blood\n\
4544-3,Hematocrit,VFr,Bld,Qn,Automated count,HEM/BC,Hct VFr Bld Auto,Hematocrit [Volume Fraction] of Blood by Automated count\n\
6690-2,Leukocytes,NCnc,Bld,Qn,Automated count,HEM/BC,WBC # Bld Auto,Leukocytes [#/volume] in Blood by Automated count\n\
777-3,Platelets,NCnc,Bld,Qn,Automated count,HEM/BC,Platelet # Bld Auto,Platelets [#/volume] in Blood by Automated count\n\
58410-2,CBC panel,-,Bld,-,Automated count,PANEL.HEM/BC,CBC panel Bld Auto,CBC panel - Blood by Automated count\n\
24323-8,Comprehensive metabolic panel,-,Ser/Plas,-,,PANEL.CHEM,CMP SerPl,Comprehensive metabolic 2000 panel - Serum or Plasma\n\
5902-2,Prothrombin time,Time,PPP,Qn,Coag,COAG,PT Time PPP,Prothrombin time (PT)\n\
6301-6,INR,RelTime,PPP,Qn,Coag,COAG,INR PPP,INR in Platelet poor plasma by Coagulation assay\n\
5811-5,Specific gravity,Rden,Urine,Qn,Test strip,UA,Sp Gr Ur Strip,Specific gravity of Urine by Test strip\n\
5804-0,Protein,MCnc,Urine,Qn,Test strip,UA,Prot Ur Strip-mCnc,Protein [Mass/volume] in Urine by Test strip\n\
24356-8,Urinalysis complete panel,-,Urine,-,,PANEL.UA,UA pnl Ur,Urinalysis complete panel - Urine\n\
600-7,Bacteria identified,Prid,Bld,Nom,Culture,MICRO,Bacteria Bld Cult,Bacteria identified in Blood by Culture\n\
630-4,Bacteria identified,Prid,Urine,Nom,Culture,MICRO,Bacteria Ur Cult,Bacteria identified in Urine by Culture\n\
882-1,ABO+Rh group,Type,Bld,Nom,,BLDBK,ABO+Rh Gp Bld,ABO and Rh group [Type] in Blood\n\
5196-1,Hepatitis B virus surface Ag,PrThr,Ser,Ord,IA,SERO,HBV surface Ag Ser Ql IA,Hepatitis B virus surface Ag [Presence] in Serum by Immunoassay\n\
3016-3,Thyrotropin,ACnc,Ser/Plas,Qn,,CHEM,TSH SerPl-aCnc,Thyrotropin [Units/volume] in Serum or Plasma\n\
3426-4,Tetrahydrocannabinol,PrThr,Urine,Ord,Screen method,DRUG/TOX,THC Ur Ql Scn,Tetrahydrocannabinol [Presence] in Urine by Screen method\n\
2106-3,Choriogonadotropin,PrThr,Urine,Ord,,FERT,HCG Preg Ur Ql,Choriogonadotropin (pregnancy test) [Presence] in Urine\n\
21613-5,Chlamydia trachomatis DNA,PrThr,XXX,Ord,Probe.amp.tar,MICRO,C trach DNA XXX Ql PCR,Chlamydia trachomatis DNA [Presence] in Specimen by NAA with probe detection\n\
2857-1,Prostate specific Ag,MCnc,Ser/Plas,Qn,,CHEM,PSA SerPl-mCnc,Prostate specific Ag [Mass/volume] in Serum or Plasma\n\
2571-8,Triglyceride,MCnc,Ser/Plas,Qn,,CHEM,Trigl SerPl-mCnc,Triglyceride [Mass/volume] in Serum or Plasma\n\
2514-8,Ketones,PrThr,Urine,Ord,Test strip,UA,Ketones Ur Ql Strip,Ketones [Presence] in Urine by Test strip\n\
26464-8,Leukocytes,NCnc,Bld,Qn,,HEM/BC,WBC # Bld,Leukocytes [#/volume] in Blood\n\
2028-9,Carbon dioxide,SCnc,Ser/Plas,Qn,,CHEM,CO2 SerPl-sCnc,\"Carbon dioxide, total [Moles/volume] in Serum or Plasma\"\n\
1742-6,Alanine aminotransferase,CCnc,Ser/Plas,Qn,,CHEM,ALT SerPl-cCnc,Alanine aminotransferase [Enzymatic activity/volume] in Serum or Plasma\n\
2093-3,Cholesterol,MCnc,Ser/Plas,Qn,,CHEM,Cholest SerPl-mCnc,Cholesterol [Mass/volume] in Serum or Plasma\n\
2532-0,Lactate dehydrogenase,CCnc,CSF,Qn,,CHEM,LDH CSF-cCnc,Lactate dehydrogenase [Enzymatic activity/volume] in Cerebral spinal fluid\n\
11529-5,Study report,Find,Tiss,Doc,,PATH,Surg path report,Surgical pathology study\n\
34714-6,INR,RelTime,Bld,Qn,Coag,COAG,INR Bld,INR in Blood by Coagulation assay\n\
94500-6,SARS-CoV-2 RNA,PrThr,Respiratory,Ord,NAA+probe,MICRO,SARS-CoV-2 RNA Resp Ql NAA+probe,SARS-CoV-2 (COVID-19) RNA [Presence] in Respiratory system specimen by NAA with probe detection\n\
46418-0,INR,RelTime,,Qn,,,INR Capillary,INR in Capillary blood by Coagulation assay\n";

fn sample_rows() -> Result<Vec<SourceRow>> {
    csv::Reader::from_reader(SAMPLE_TABLE.as_bytes())
        .deserialize()
        .collect::<Result<Vec<SourceRow>, _>>()
        .context("parsing built-in sample table")
}

fn write_csv(path: &str, rows: &[SourceRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &str, rows: &[SourceRow]) -> Result<()> {
    let string_column = |get: fn(&SourceRow) -> Option<&str>| -> ArrayRef {
        Arc::new(rows.iter().map(get).collect::<StringArray>())
    };

    let names = [
        columns::LOINC_NUM,
        columns::COMPONENT,
        columns::PROPERTY,
        columns::SYSTEM,
        columns::SCALE_TYP,
        columns::METHOD_TYP,
        columns::CLASS,
        columns::SHORTNAME,
        columns::LONG_COMMON_NAME,
    ];
    let arrays = vec![
        string_column(|r| Some(r.loinc_num.as_str())),
        string_column(|r| r.component.as_deref()),
        string_column(|r| r.property.as_deref()),
        string_column(|r| r.system.as_deref()),
        string_column(|r| r.scale_typ.as_deref()),
        string_column(|r| r.method_typ.as_deref()),
        string_column(|r| r.class.as_deref()),
        string_column(|r| r.shortname.as_deref()),
        string_column(|r| r.long_common_name.as_deref()),
    ];

    let schema = Arc::new(Schema::new(
        names
            .iter()
            .map(|name| Field::new(*name, DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ));
    let batch = RecordBatch::try_new(schema.clone(), arrays).context("building record batch")?;

    let file = File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let rows = sample_rows()?;

    write_csv(SAMPLE_CSV_PATH, &rows)?;
    write_parquet(SAMPLE_PARQUET_PATH, &rows)?;

    println!(
        "Wrote {} lab tests to {SAMPLE_CSV_PATH} and {SAMPLE_PARQUET_PATH}",
        rows.len()
    );
    Ok(())
}
